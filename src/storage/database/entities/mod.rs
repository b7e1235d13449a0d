//! sea-orm entities, one module per table

pub mod appointment;
pub mod campaign;
pub mod cancellation_token;
pub mod coupon;
pub mod customer;
pub mod email_verification_token;
pub mod expense;
pub mod inventory_item;
pub mod marketing_template;
pub mod notification;
pub mod password_reset_token;
pub mod revenue;
pub mod social_post;
pub mod task;
pub mod user;
pub mod user_role;
pub mod user_session;

pub use appointment::Entity as Appointment;
pub use campaign::Entity as Campaign;
pub use cancellation_token::Entity as CancellationToken;
pub use coupon::Entity as Coupon;
pub use customer::Entity as Customer;
pub use email_verification_token::Entity as EmailVerificationToken;
pub use expense::Entity as Expense;
pub use inventory_item::Entity as InventoryItem;
pub use marketing_template::Entity as MarketingTemplate;
pub use notification::Entity as Notification;
pub use password_reset_token::Entity as PasswordResetToken;
pub use revenue::Entity as Revenue;
pub use social_post::Entity as SocialPost;
pub use task::Entity as Task;
pub use user::Entity as User;
pub use user_role::Entity as UserRole;
pub use user_session::Entity as UserSession;
