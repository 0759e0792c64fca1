//! Instructors page: roster, bookings and their status.

use std::sync::Arc;

use lotus::resources::instructors::{
    InstructorsService,
    models::{Booking, BookingId, BookingStatus, Instructor, InstructorId, NewInstructor, Reference},
};
use tracing::warn;

use super::{Applied, ListView, ViewScope, render_table};
use crate::notifications::Notification;

pub struct InstructorsView {
    service: Arc<dyn InstructorsService>,
    instructors: ListView<Instructor>,
    bookings: ListView<Booking>,
}

impl InstructorsView {
    #[must_use]
    pub fn new(service: Arc<dyn InstructorsService>, scope: &ViewScope) -> Self {
        Self {
            service,
            instructors: ListView::new(scope.child(), "Failed to fetch instructors"),
            bookings: ListView::new(scope.child(), "Failed to fetch bookings"),
        }
    }

    pub async fn load_instructors(&mut self) -> Applied {
        let ticket = self.instructors.ticket();
        let result = self.service.list_instructors().await;

        self.instructors.apply(ticket, result)
    }

    pub async fn load_bookings(&mut self) -> Applied {
        let ticket = self.bookings.ticket();
        let result = self.service.list_bookings().await;

        self.bookings.apply(ticket, result)
    }

    #[must_use]
    pub fn instructors(&self) -> &[Instructor] {
        self.instructors.items()
    }

    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        self.bookings.items()
    }

    /// Submit the form, then refresh the roster.
    pub async fn add(&mut self, form: &NewInstructor) -> Notification {
        if let Err(error) = self.service.add_instructor(form).await {
            return Notification::from_error("Failed to add instructor", &error);
        }

        if let Applied::Failed(refresh) = self.load_instructors().await {
            warn!("instructor added but the roster could not be refreshed: {refresh}");
        }

        Notification::success("Success").with_description("Instructor added successfully")
    }

    pub async fn remove(&mut self, id: &InstructorId) -> Notification {
        if let Err(error) = self.service.remove_instructor(id).await {
            return Notification::from_error("Failed to delete instructor", &error);
        }

        if let Applied::Failed(refresh) = self.load_instructors().await {
            warn!("instructor removed but the roster could not be refreshed: {refresh}");
        }

        Notification::success("Success").with_description("Instructor removed successfully")
    }

    pub async fn set_booking_status(&mut self, id: &BookingId, status: BookingStatus) -> Notification {
        if let Err(error) = self.service.update_booking_status(id, status).await {
            return Notification::from_error("Status update failed", &error);
        }

        if let Applied::Failed(refresh) = self.load_bookings().await {
            warn!("booking updated but the list could not be refreshed: {refresh}");
        }

        Notification::success("Updated").with_description(format!("Status updated to {status}"))
    }

    #[must_use]
    pub fn render_instructors(&self) -> String {
        render_table(
            ["Id", "Name", "Rating", "Price", "Description"],
            self.instructors().iter().map(|instructor| {
                [
                    instructor.id.to_string(),
                    instructor.name.clone(),
                    format!("{:.1}", instructor.rating),
                    instructor.price.to_string(),
                    instructor.description.clone(),
                ]
            }),
            &[2, 3],
            "No instructors yet",
        )
    }

    #[must_use]
    pub fn render_bookings(&self) -> String {
        render_table(
            ["Id", "User", "Instructor", "Date", "Time", "Mobile", "Status"],
            self.bookings().iter().map(|booking| {
                [
                    booking.id.to_string(),
                    label(booking.user.as_ref()),
                    label(booking.instructor.as_ref()),
                    booking.date.as_deref().map(date_only).unwrap_or_default().to_string(),
                    booking.time.clone(),
                    booking.mobile.clone(),
                    booking.status.to_string(),
                ]
            }),
            &[],
            "No bookings yet",
        )
    }
}

fn label(reference: Option<&Reference>) -> String {
    reference.map(Reference::label).unwrap_or_default().to_string()
}

/// Calendar part of an ISO timestamp.
fn date_only(value: &str) -> &str {
    value.split_once('T').map_or(value, |(date, _)| date)
}

#[cfg(test)]
mod tests {
    use lotus::{
        api::{ApiError, ApiErrorKind},
        resources::{Acknowledged, instructors::MockInstructorsService},
    };
    use rust_decimal::Decimal;

    use super::*;

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: "b1".into(),
            user: Some(Reference::Id("u1".into())),
            instructor: Some(Reference::Id("i1".into())),
            date: Some("2024-01-15T00:00:00.000Z".into()),
            time: "08:00".into(),
            mobile: "0501234567".into(),
            status,
        }
    }

    #[tokio::test]
    async fn status_change_refreshes_bookings() {
        let mut service = MockInstructorsService::new();

        service
            .expect_update_booking_status()
            .once()
            .withf(|id, status| id.as_str() == "b1" && *status == BookingStatus::Confirmed)
            .return_once(|_, _| Ok(Acknowledged::default()));

        service
            .expect_list_bookings()
            .once()
            .return_once(|| Ok(vec![booking(BookingStatus::Confirmed)]));

        let mut view = InstructorsView::new(Arc::new(service), &ViewScope::new());

        let notification = view
            .set_booking_status(&BookingId::new("b1"), BookingStatus::Confirmed)
            .await;

        assert_eq!(
            notification.description.as_deref(),
            Some("Status updated to confirmed")
        );
        assert!(view.render_bookings().contains("2024-01-15"), "date column");
    }

    #[tokio::test]
    async fn rejected_form_never_refreshes() {
        let mut service = MockInstructorsService::new();

        service
            .expect_add_instructor()
            .once()
            .return_once(|_| Err(ApiError::validation("All fields required")));

        service.expect_list_instructors().never();

        let mut view = InstructorsView::new(Arc::new(service), &ViewScope::new());

        let form = NewInstructor {
            name: String::new(),
            image: String::new(),
            rating: 5,
            price: Decimal::ZERO,
            description: String::new(),
        };

        let notification = view.add(&form).await;

        assert!(notification.is_destructive(), "invalid form must fail");
        assert_eq!(notification.description.as_deref(), Some("All fields required"));
    }

    #[tokio::test]
    async fn remove_failure_keeps_roster() {
        let mut service = MockInstructorsService::new();

        service.expect_list_instructors().once().return_once(|| {
            Ok(vec![Instructor {
                id: "i1".into(),
                name: "Lisa Martinez".into(),
                image: String::new(),
                rating: 4.8,
                price: Decimal::from(150),
                description: "Vinyasa".into(),
            }])
        });

        service.expect_remove_instructor().once().return_once(|_| {
            Err(ApiError::new(ApiErrorKind::Server, Some(500), "server error"))
        });

        let mut view = InstructorsView::new(Arc::new(service), &ViewScope::new());
        view.load_instructors().await;

        let notification = view.remove(&InstructorId::new("i1")).await;

        assert!(notification.is_destructive(), "server error must be reported");
        assert_eq!(view.instructors().len(), 1);
        assert!(view.render_instructors().contains("4.8"), "rating column");
    }
}
