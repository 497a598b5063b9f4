mod entry_provider;
pub(crate) use entry_provider::EntryProvider;

mod cursor_provider;
pub(crate) use cursor_provider::SyncCursorProvider;
