pub mod instruction_footer;
pub mod location_input;

pub use instruction_footer::InstructionFooter;
pub use location_input::LocationInput;
