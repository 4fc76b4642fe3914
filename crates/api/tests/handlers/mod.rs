mod courses_test;
mod gateway_test;
mod middleware_test;
mod suggestions_test;
