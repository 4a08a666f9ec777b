mod concurrency_tests;
mod support;
