// In-memory implementations of the repository traits plus recording fakes
// for the notifier and the completion client.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use nestcare::core::{AppError, Result};
use nestcare::modules::accounts::{User, UserRepository, UserRole};
use nestcare::modules::bookings::{Booking, BookingRepository, BookingStatus};
use nestcare::modules::catalog::{CareService, CareServiceRepository};
use nestcare::modules::notifications::BookingNotifier;
use nestcare::modules::recommendations::CompletionClient;
use nestcare::modules::timeline::{TimelineEvent, TimelineRepository};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(AppError::conflict("An account with this email already exists."));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let mut users = self.users.lock().unwrap().clone();
        users.reverse();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update_role(&self, id: &str, role: UserRole, updated_at: DateTime<Utc>) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.role = role;
                user.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryCareServiceRepository {
    services: Mutex<Vec<CareService>>,
}

impl InMemoryCareServiceRepository {
    /// Store a service directly, bypassing validation
    pub fn seed(&self, service: CareService) {
        self.services.lock().unwrap().push(service);
    }
}

#[async_trait]
impl CareServiceRepository for InMemoryCareServiceRepository {
    async fn insert(&self, service: &CareService) -> Result<()> {
        let mut services = self.services.lock().unwrap();
        if services.iter().any(|s| s.slug == service.slug) {
            return Err(AppError::conflict(format!(
                "A service with slug '{}' already exists.",
                service.slug
            )));
        }
        services.push(service.clone());
        Ok(())
    }

    async fn update(&self, service: &CareService) -> Result<()> {
        let mut services = self.services.lock().unwrap();
        if services
            .iter()
            .any(|s| s.slug == service.slug && s.id != service.id)
        {
            return Err(AppError::conflict(format!(
                "A service with slug '{}' already exists.",
                service.slug
            )));
        }
        match services.iter_mut().find(|s| s.id == service.id) {
            Some(existing) => {
                *existing = service.clone();
                Ok(())
            }
            None => Err(AppError::not_found("Service not found.")),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CareService>> {
        Ok(self.services.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CareService>> {
        Ok(self
            .services
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.slug == slug)
            .cloned())
    }

    async fn list(&self, active_only: bool) -> Result<Vec<CareService>> {
        let mut services: Vec<CareService> = self
            .services
            .lock()
            .unwrap()
            .iter()
            .filter(|s| !active_only || s.is_active())
            .cloned()
            .collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.services.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingRepository {
    pub fn len(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }

    pub fn get(&self, id: &str) -> Option<Booking> {
        self.bookings.lock().unwrap().iter().find(|b| b.id == id).cloned()
    }

    fn newest_first(mut bookings: Vec<Booking>) -> Vec<Booking> {
        bookings.reverse();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<()> {
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>> {
        Ok(self.get(id))
    }

    async fn list_all(&self) -> Result<Vec<Booking>> {
        Ok(Self::newest_first(self.bookings.lock().unwrap().clone()))
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        let owned = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        Ok(Self::newest_first(owned))
    }

    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.iter_mut().find(|b| b.id == id) {
            Some(booking) => {
                booking.status = status;
                booking.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.len() as i64)
    }

    async fn completed_revenue(&self) -> Result<Decimal> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .map(|b| b.total_cost)
            .sum::<Decimal>()
            .normalize())
    }
}

#[derive(Default)]
pub struct InMemoryTimelineRepository {
    events: Mutex<Vec<TimelineEvent>>,
}

impl InMemoryTimelineRepository {
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl TimelineRepository for InMemoryTimelineRepository {
    async fn append(&self, event: &TimelineEvent) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn list_for_booking(&self, booking_id: &str) -> Result<Vec<TimelineEvent>> {
        let events = self.events.lock().unwrap();
        let mut matching: Vec<(usize, TimelineEvent)> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.booking_id == booking_id)
            .map(|(seq, e)| (seq, e.clone()))
            .collect();
        matching.sort_by(|(seq_a, a), (seq_b, b)| {
            b.timestamp.cmp(&a.timestamp).then(seq_b.cmp(seq_a))
        });
        Ok(matching.into_iter().map(|(_, e)| e).collect())
    }
}

/// Notification sent through the recording notifier
#[derive(Debug, Clone, PartialEq)]
pub struct SentNotification {
    pub booking_id: String,
    pub recipient: String,
    pub service_name: String,
}

/// Records invoices instead of mailing them; can be told to fail
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentNotification>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().unwrap().clone()
    }

    /// Poll until `count` notifications arrived or a second passed
    pub async fn wait_for(&self, count: usize) -> Vec<SentNotification> {
        for _ in 0..100 {
            if self.sent.lock().unwrap().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl BookingNotifier for RecordingNotifier {
    async fn booking_created(&self, booking: &Booking, service: &CareService) -> Result<()> {
        self.sent.lock().unwrap().push(SentNotification {
            booking_id: booking.id.clone(),
            recipient: booking.customer.email.clone(),
            service_name: service.name.clone(),
        });
        if self.fail {
            return Err(AppError::upstream("SMTP relay refused the message"));
        }
        Ok(())
    }
}

/// Completion client with a canned answer that remembers its prompts
pub struct FakeCompletionClient {
    answer: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeCompletionClient {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Ok(answer.to_string()),
            prompts: Mutex::default(),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            answer: Err(reason.to_string()),
            prompts: Mutex::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for FakeCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.clone().map_err(AppError::upstream)
    }
}
