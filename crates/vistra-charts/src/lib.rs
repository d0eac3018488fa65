//! Vistra chart engine: bar, line and pie charts as a pure function of
//! (dataset, series, config, pointer state, time) to (draw commands,
//! events).
//!
//! The host owns the render loop and the backend. A typical frame:
//!
//! ```
//! use vistra_charts::{ChartConfig, ChartEngine, DataPoint, Dataset, Series};
//! use vistra_core::RecordingCanvas;
//!
//! let dataset = Dataset::from_points(vec![
//!     DataPoint::new("Jan").with_value("clicks", 120.0),
//!     DataPoint::new("Feb").with_value("clicks", 80.0),
//! ]);
//! let series = vec![Series::new("clicks", "Clicks")];
//! let mut engine = ChartEngine::new(dataset, series, ChartConfig::default(), 480.0, 360.0);
//! engine.mount(0.0);
//!
//! let mut canvas = RecordingCanvas::new();
//! let mut now = 0.0;
//! loop {
//!     let more = engine.tick(now);
//!     canvas.begin_frame();
//!     engine.render(&mut canvas);
//!     if !more {
//!         break;
//!     }
//!     now += 16.0;
//! }
//! assert!(!canvas.commands().is_empty());
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod export;
pub mod hit;
pub mod legend;
pub mod tooltip;
pub mod viewport;

pub use chart::{ChartEngine, ChartEvent};
pub use config::{BarMode, ChartConfig, ChartKind, Margins};
pub use data::{DataPoint, Dataset, Series, Slice};
pub use export::ExportError;
pub use hit::{HitArena, HitRegion, HitShape};
pub use legend::LegendEntry;
pub use tooltip::TooltipLayout;
pub use viewport::Viewport;
