mod contact_text;

pub use contact_text::ContactText;
