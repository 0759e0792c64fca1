//! Instructors service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    api::{ApiClient, ApiError, SubService},
    resources::{
        Acknowledged,
        instructors::models::{
            Booking, BookingId, BookingStatus, BookingStatusUpdate, Instructor, InstructorId,
            NewInstructor,
        },
    },
};

/// Instructors service over the yoga sub-service.
#[derive(Debug, Clone)]
pub struct HttpInstructorsService {
    client: ApiClient,
}

impl HttpInstructorsService {
    /// Service issuing calls through `client`.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InstructorsService for HttpInstructorsService {
    async fn list_instructors(&self) -> Result<Vec<Instructor>, ApiError> {
        self.client.get(SubService::Yoga, &["instructor"]).await
    }

    async fn add_instructor(&self, instructor: &NewInstructor) -> Result<Acknowledged, ApiError> {
        instructor.validate()?;

        self.client
            .post(SubService::Yoga, &["instructor", "add"], instructor)
            .await
    }

    async fn remove_instructor(&self, id: &InstructorId) -> Result<Acknowledged, ApiError> {
        self.client
            .delete(SubService::Yoga, &["instructor", id.as_str()])
            .await
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        let bookings: Vec<Booking> = self
            .client
            .get(SubService::Yoga, &["allBookedInstrector"])
            .await?;

        let total = bookings.len();

        let complete: Vec<Booking> = bookings
            .into_iter()
            .filter(Booking::is_complete)
            .collect();

        if complete.len() < total {
            debug!(
                dropped = total - complete.len(),
                "skipping bookings with a missing user or instructor"
            );
        }

        Ok(complete)
    }

    async fn update_booking_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> Result<Acknowledged, ApiError> {
        self.client
            .post(
                SubService::Yoga,
                &["updateStatusIns"],
                &BookingStatusUpdate { id, status },
            )
            .await
    }
}

/// Instructor roster and class bookings.
#[automock]
#[async_trait]
pub trait InstructorsService: Send + Sync {
    /// Retrieves every instructor.
    async fn list_instructors(&self) -> Result<Vec<Instructor>, ApiError>;

    /// Validates and submits a new instructor.
    async fn add_instructor(&self, instructor: &NewInstructor) -> Result<Acknowledged, ApiError>;

    /// Deletes an instructor.
    async fn remove_instructor(&self, id: &InstructorId) -> Result<Acknowledged, ApiError>;

    /// Retrieves bookings, skipping any whose user or instructor no longer exists.
    async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError>;

    /// Moves a booking to `status`.
    async fn update_booking_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> Result<Acknowledged, ApiError>;
}
