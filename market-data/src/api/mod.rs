pub mod coingecko;
pub mod lunarcrush;

pub use coingecko::CoinGeckoClient;
pub use lunarcrush::LunarCrushClient;
