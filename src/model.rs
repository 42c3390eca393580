mod contacts;

pub use contacts::{Contact, NewContact};
