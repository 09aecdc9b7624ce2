pub mod enums;
pub mod field_spec;
pub mod observation;

pub use enums::{Domain, Label, View};
pub use field_spec::FieldSpec;
pub use observation::ObservationRecord;
