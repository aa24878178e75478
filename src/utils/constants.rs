/// Product retained by ingestion unless configured otherwise
pub const DEFAULT_PRODUCT: &str = "pink morsel";

/// Raw extract naming: `daily_sales_data_<suffix>.csv`
pub const DEFAULT_FILE_PREFIX: &str = "daily_sales_data_";
pub const INPUT_EXTENSION: &str = "csv";

/// Default locations
pub const DEFAULT_INPUT_DIR: &str = "data";
pub const DEFAULT_OUTPUT_FILE: &str = "pink_morsels_sales.csv";
pub const DEFAULT_CONFIG_FILE: &str = "morsel-sales.toml";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "MORSEL";

/// Canonical table columns, in file order
pub const SALES_COLUMN: &str = "Sales";
pub const DATE_COLUMN: &str = "Date";
pub const REGION_COLUMN: &str = "Region";
pub const CANONICAL_HEADER: [&str; 3] = [SALES_COLUMN, DATE_COLUMN, REGION_COLUMN];

/// Date layout shared by raw extracts and the canonical table
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Currency marker stripped from raw prices
pub const CURRENCY_PREFIX: char = '$';

/// Fractional digits of every canonical sales amount
pub const SALES_SCALE: u32 = 2;

/// Pseudo-region selecting every region
pub const ALL_REGIONS: &str = "all";

/// Documented price-increase date (2021-01-15)
pub const PRICE_CHANGE_YEAR: i32 = 2021;
pub const PRICE_CHANGE_MONTH: u32 = 1;
pub const PRICE_CHANGE_DAY: u32 = 15;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
