/// Contact form and administrator endpoints
pub mod contacts;
