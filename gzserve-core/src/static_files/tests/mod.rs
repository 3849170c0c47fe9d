mod etag_tests;
mod handler_tests;
mod range_tests;
mod resolve_tests;
