pub mod builders;
pub mod dispatch;
pub mod services;
