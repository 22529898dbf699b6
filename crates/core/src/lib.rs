pub mod config;
pub mod converter;
pub mod media;
pub mod registry;
pub mod report;
pub mod staging;
pub mod testing;
pub mod worker;

pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, DecisionPolicy,
};
pub use converter::{Converter, ConverterConfig, ConverterError, ConverterSet};
pub use media::{Extension, MediaError, MediaType};
pub use registry::{ConversionRegistry, ConversionRoute, ConverterKind, RegistryError};
pub use report::{
    create_report_system, FileSessionReporter, ReportHandle, ReportWriter, SessionRecord,
    SessionReporter,
};
pub use staging::{StagedFile, StagingArea, StagingError};
pub use worker::{
    CancelHandle, ConversionOutcome, ConversionWorker, Decision, DecisionRequest, SessionSummary,
    SkipReason, WorkerEvent, WorkerHandle, WorkerState,
};
