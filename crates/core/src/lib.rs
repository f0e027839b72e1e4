pub mod config;
pub mod metrics;
pub mod orchestrator;
pub mod product;
pub mod query;
pub mod searcher;
pub mod testing;
pub mod validation;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, resolve_base_url, validate_config,
    ApiConfig, ApiEndpoints, Config, ConfigError, PageLocation, PolicyConfig,
};
pub use orchestrator::{OrchestratorConfig, SearchOrchestrator, SearchState, SubmitOutcome};
pub use product::{InventoryStatus, PriceDisplay, Product, ProductId, ProductImage};
pub use query::{build_query, AgeRange, ColorStyle, Gender, SearchFilters};
pub use searcher::{
    HttpSearchClient, ProductSearcher, SearchError, SearchErrorKind, SearchRequest,
    SearchResponse,
};
pub use validation::{
    validate, ContentPolicy, MatchMode, QueryValidator, RejectReason, ValidationOutcome,
};
