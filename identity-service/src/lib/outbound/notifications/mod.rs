pub mod reset_link;

pub use reset_link::LogResetLinkNotifier;
