// Service graph shared by every worker, and the route table built from it

use std::sync::Arc;

use actix_web::web;
use sqlx::MySqlPool;

use crate::middleware::{json_error_handler, path_error_handler, query_error_handler};
use crate::modules::accounts::{AccountService, MySqlUserRepository, UserRepository};
use crate::modules::admin::AdminService;
use crate::modules::bookings::{BookingRepository, BookingService, MySqlBookingRepository};
use crate::modules::catalog::{CareServiceRepository, CatalogService, MySqlCareServiceRepository};
use crate::modules::notifications::BookingNotifier;
use crate::modules::recommendations::{CompletionClient, RecommendationService};
use crate::modules::timeline::{MySqlTimelineRepository, TimelineRepository, TimelineService};
use crate::modules::{accounts, admin, bookings, catalog, health, recommendations};

/// Storage backends behind the services
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub services: Arc<dyn CareServiceRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub timeline: Arc<dyn TimelineRepository>,
}

impl Repositories {
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            services: Arc::new(MySqlCareServiceRepository::new(pool.clone())),
            bookings: Arc::new(MySqlBookingRepository::new(pool.clone())),
            timeline: Arc::new(MySqlTimelineRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub catalog: Arc<CatalogService>,
    pub bookings: Arc<BookingService>,
    pub timeline: Arc<TimelineService>,
    pub recommendations: Arc<RecommendationService>,
    pub admin: Arc<AdminService>,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        notifier: Arc<dyn BookingNotifier>,
        completion: Option<Arc<dyn CompletionClient>>,
        admin_emails: Vec<String>,
    ) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(repos.users.clone(), admin_emails)),
            catalog: Arc::new(CatalogService::new(repos.services.clone())),
            bookings: Arc::new(BookingService::new(
                repos.bookings.clone(),
                repos.services.clone(),
                notifier,
            )),
            timeline: Arc::new(TimelineService::new(
                repos.timeline.clone(),
                repos.bookings.clone(),
            )),
            recommendations: Arc::new(RecommendationService::new(
                repos.services.clone(),
                completion,
            )),
            admin: Arc::new(AdminService::new(repos.bookings, repos.users, repos.services)),
        }
    }

    /// Register services, extractor error handlers and every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.accounts.clone()))
            .app_data(web::Data::new(self.catalog.clone()))
            .app_data(web::Data::new(self.bookings.clone()))
            .app_data(web::Data::new(self.timeline.clone()))
            .app_data(web::Data::new(self.recommendations.clone()))
            .app_data(web::Data::new(self.admin.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .configure(health::configure)
            .configure(accounts::controllers::configure)
            .configure(catalog::controllers::configure)
            .configure(bookings::controllers::configure)
            .configure(recommendations::controllers::configure)
            .configure(admin::controllers::configure);
    }
}
