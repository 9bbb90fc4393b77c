pub mod event_source;
