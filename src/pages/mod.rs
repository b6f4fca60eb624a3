mod login;
mod register;

pub use login::LoginPage;
pub use register::RegisterPage;
