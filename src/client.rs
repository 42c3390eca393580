mod captcha_client;

pub use captcha_client::{CaptchaClient, Verifier};
