pub mod backends;
pub mod error;
pub mod traits;

pub use backends::MemoryGrid;
pub use error::GridError;
pub use traits::{SheetReader, UpdateMap, UpdateSink};

// Re-export for convenience
pub use sheetback_common::{CellValue, Coordinate};
