pub mod use_cases;

pub use use_cases::connection_details::ConnectionDetailsUseCase;
pub use use_cases::session::SessionUseCase;
pub use use_cases::spec_detail::SpecDetailStore;
pub use use_cases::test_cases::TestCaseUseCase;
pub use use_cases::translation::TranslationUseCase;
