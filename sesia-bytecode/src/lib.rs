pub mod builder;
pub mod data;
pub mod display;
pub mod opcode;
pub mod program;
pub mod reader;

pub use builder::*;
pub use data::*;
pub use display::display_instruction;
pub use opcode::{
    InstructionFormat, Opcode, ARRAY_DATA_PAYLOAD_IDENT, PACKED_SWITCH_PAYLOAD_IDENT,
    SPARSE_SWITCH_PAYLOAD_IDENT,
};
pub use program::{
    ClassData, ClassId, ClassKind, ElementType, FieldData, FieldId, FieldKind, MethodData,
    MethodId, Program,
};
pub use reader::*;
