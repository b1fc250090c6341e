mod choice;
mod estimate;
pub mod lenient;
mod line_item;
mod rate_table;
mod service_inputs;
mod totals;

pub use choice::{AccessDifficulty, BedCover, Frequency, LeafDepth, MaintenanceTier, PaverTier};
pub use estimate::{
    Customer, CustomerRecord, CustomerUpdate, EstimateDraft, NewSavedEstimate, SavedEstimate,
    format_estimate_number, normalize_customer_name,
};
pub use line_item::{CategoryGroup, LineItem, NEGLIGIBLE_AMOUNT};
pub use rate_table::{RateTable, RateTableError, non_negative};
pub use service_inputs::{
    ApplicationInputs, Category, CategoryInputs, DEFAULT_CONTRACT_MONTHS, HardscapeInputs,
    LandscapeInputs, MAX_APPLICATIONS_PER_YEAR, MaintenanceInputs, PaymentControls,
    SeasonalInputs, ServiceInputs, Treatment,
};
pub use totals::{AggregateTotals, CategoryTotals, MonthlyPlan};
