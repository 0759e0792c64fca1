//! Content page.

use crate::{
    content::{ContentError, ContentKind, ContentStore, PublishState, SiteContent},
    notifications::Notification,
};

use super::render_table;

#[derive(Debug)]
pub struct ContentView {
    store: ContentStore,
    content: SiteContent,
}

impl ContentView {
    /// Mount the view over the content file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(store: ContentStore) -> Result<Self, ContentError> {
        let content = store.load()?;

        Ok(Self { store, content })
    }

    #[must_use]
    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    /// Set the publish state and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is unknown or the file cannot be written;
    /// the in-memory content is left as it was.
    pub fn set_status(
        &mut self,
        kind: ContentKind,
        id: u32,
        state: PublishState,
    ) -> Result<Notification, ContentError> {
        let mut updated = self.content.clone();
        updated.set_status(kind, id, state)?;

        self.store.save(&updated)?;
        self.content = updated;

        Ok(Notification::success("Content updated")
            .with_description(format!("{kind} {id} is now {state}")))
    }

    #[must_use]
    pub fn render(&self) -> String {
        let testimonials = render_table(
            ["Id", "Name", "Rating", "Status", "Text"],
            self.content.testimonials.iter().map(|entry| {
                [
                    entry.id.to_string(),
                    entry.name.clone(),
                    entry.rating.to_string(),
                    entry.status.to_string(),
                    entry.text.clone(),
                ]
            }),
            &[0, 2],
            "No testimonials",
        );

        let posts = render_table(
            ["Id", "Title", "Author", "Date", "Status", "Views"],
            self.content.blog_posts.iter().map(|post| {
                [
                    post.id.to_string(),
                    post.title.clone(),
                    post.author.clone(),
                    post.date.to_string(),
                    post.status.to_string(),
                    post.views.to_string(),
                ]
            }),
            &[0, 5],
            "No blog posts",
        );

        format!("Testimonials\n{testimonials}\n\nBlog posts\n{posts}")
    }
}
