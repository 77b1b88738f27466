mod form;
mod notify;
mod timer;

pub use form::SubscriptionForm;
pub use notify::SubscribeClient;
