pub mod use_cases;

pub use use_cases::generate_api_tests::GenerateApiTestsUseCase;
pub use use_cases::generate_tests::GenerateTestsUseCase;
pub use use_cases::session::GenerationSession;
