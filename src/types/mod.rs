pub mod candle;
pub mod config;
pub mod levels;
pub mod series;
pub mod signals;

pub use candle::Candle;
pub use config::{
    AroonParams, AtrParams, BollingerParams, ChaikinParams, CciParams, DonchianParams, EmaParams,
    EnvelopeParams, FibBandsParams, FibParams, IchimokuParams, IndicatorConfig, MaParams,
    MacdParams, PivotParams, PriceLevelConfig, PsarParams, RsiParams, StochasticParams,
    SupertrendParams, Toggle, TradeParams, VolumeParams, ZigZagParams,
};
pub use levels::{PriceLevels, ProfitLoss};
pub use series::{IndicatorSeries, OhlcSeriesPoint, SeriesData, SeriesPoint};
pub use signals::{
    ComponentScore, ComponentWeights, IndicatorResult, IndicatorSummary, PatternResult,
    PatternSummary, RawScores, SignalBreakdown, SignalDirection, SignalLabel, SignalResult,
    SignalTier,
};
