/// Presentation widgets
///
/// Views render from `&Gallery` and emit gallery `Event`s; the
/// application maps them into its own messages.

pub mod browse;
pub mod form;
