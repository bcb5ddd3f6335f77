pub mod page_session;
