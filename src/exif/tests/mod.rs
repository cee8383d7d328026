mod parser_tests;
mod types_tests;
