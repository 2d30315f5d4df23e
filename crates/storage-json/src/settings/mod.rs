mod repository;

pub use repository::JsonRateConfigurationRepository;
