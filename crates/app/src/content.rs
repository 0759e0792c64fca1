//! Site content: testimonials and blog posts kept in a local YAML file.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or writing the content file.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Reading or writing the file failed.
    #[error("failed to access content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid content YAML.
    #[error(transparent)]
    Yaml(#[from] serde_norway::Error),

    /// No entry of that kind has the given id.
    #[error("no {kind} with id {id}")]
    NotFound { kind: ContentKind, id: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublishState {
    Published,
    Draft,
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Published => "Published",
            Self::Draft => "Draft",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ContentKind {
    Testimonial,
    BlogPost,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Testimonial => "testimonial",
            Self::BlogPost => "blog post",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: u32,
    pub name: String,
    pub text: String,
    pub rating: u8,

    #[serde(default)]
    pub image: String,

    pub status: PublishState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: u32,
    pub title: String,

    #[serde(default)]
    pub excerpt: String,

    pub author: String,
    pub date: Date,
    pub status: PublishState,

    #[serde(default)]
    pub views: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,

    #[serde(default)]
    pub blog_posts: Vec<BlogPost>,
}

impl SiteContent {
    /// Change the publish state of one entry.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::NotFound`] when no entry has that id.
    pub fn set_status(
        &mut self,
        kind: ContentKind,
        id: u32,
        state: PublishState,
    ) -> Result<(), ContentError> {
        let status = match kind {
            ContentKind::Testimonial => self
                .testimonials
                .iter_mut()
                .find(|entry| entry.id == id)
                .map(|entry| &mut entry.status),
            ContentKind::BlogPost => self
                .blog_posts
                .iter_mut()
                .find(|entry| entry.id == id)
                .map(|entry| &mut entry.status),
        };

        *status.ok_or(ContentError::NotFound { kind, id })? = state;

        Ok(())
    }
}

/// Content file on disk.
#[derive(Debug, Clone)]
pub struct ContentStore {
    path: PathBuf,
}

impl ContentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file reads as empty content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<SiteContent, ContentError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(SiteContent::default()),
            Ok(raw) => Ok(serde_norway::from_str(&raw)?),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(SiteContent::default()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the content cannot be serialised or written.
    pub fn save(&self, content: &SiteContent) -> Result<(), ContentError> {
        let raw = serde_norway::to_string(content)?;

        fs::write(&self.path, raw).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> ContentError {
        ContentError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
