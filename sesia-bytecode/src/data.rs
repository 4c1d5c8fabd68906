use std::fmt;

use bincode::{Decode, Encode};

use crate::opcode::Opcode;
use crate::program::{ClassId, FieldId, MethodId};
use crate::reader::BytecodeCursor;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Decode, Encode)]
pub struct BytecodeOffset(pub u32);

impl BytecodeOffset {
    pub fn to_u32(&self) -> u32 {
        self.0
    }

    pub fn to_usize(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Decode, Encode)]
pub struct Location {
    line: u32,
    column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Location {
        Location { line, column }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Decode, Encode)]
pub struct ConstPoolIdx(pub u32);

impl ConstPoolIdx {
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ConstPoolIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Decode, Encode)]
pub enum ConstPoolEntry {
    String(String),
    Class(ClassId),
    Field(FieldId),
    Method(MethodId),
}

impl ConstPoolEntry {
    pub fn to_string_value(&self) -> Option<&str> {
        match self {
            ConstPoolEntry::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn to_class(&self) -> Option<ClassId> {
        match self {
            ConstPoolEntry::Class(id) => Some(*id),
            _ => None,
        }
    }

    pub fn to_field(&self) -> Option<FieldId> {
        match self {
            ConstPoolEntry::Field(id) => Some(*id),
            _ => None,
        }
    }

    pub fn to_method(&self) -> Option<MethodId> {
        match self {
            ConstPoolEntry::Method(id) => Some(*id),
            _ => None,
        }
    }
}

/// One handler of a try range: the caught class (`None` catches
/// everything) and the handler's code-unit offset.
#[derive(Clone, Debug, Decode, Encode)]
pub struct CatchHandler {
    pub class_idx: Option<ConstPoolIdx>,
    pub handler_pc: u32,
}

/// A protected code-unit range. Ranges are stored innermost-first for
/// nested tries.
#[derive(Clone, Debug, Decode, Encode)]
pub struct TryItem {
    pub start_pc: u32,
    pub insn_count: u32,
    pub handlers: Vec<CatchHandler>,
}

impl TryItem {
    pub fn covers(&self, pc: u32) -> bool {
        pc >= self.start_pc && pc < self.start_pc + self.insn_count
    }
}

/// The packed body of one method: register counts, code units, the try
/// table, the source location table and the method's constant pool.
#[derive(Clone, Debug, Decode, Encode)]
pub struct CodeItem {
    registers_size: u16,
    ins_size: u16,
    outs_size: u16,
    insns: Vec<u16>,
    tries: Vec<TryItem>,
    locations: Vec<(BytecodeOffset, Location)>,
    const_pool: Vec<ConstPoolEntry>,
}

impl CodeItem {
    pub fn new(
        registers_size: u16,
        ins_size: u16,
        outs_size: u16,
        insns: Vec<u16>,
        tries: Vec<TryItem>,
        locations: Vec<(BytecodeOffset, Location)>,
        const_pool: Vec<ConstPoolEntry>,
    ) -> CodeItem {
        assert!(ins_size <= registers_size);
        CodeItem {
            registers_size,
            ins_size,
            outs_size,
            insns,
            tries,
            locations,
            const_pool,
        }
    }

    pub fn registers_size(&self) -> u16 {
        self.registers_size
    }

    pub fn ins_size(&self) -> u16 {
        self.ins_size
    }

    pub fn outs_size(&self) -> u16 {
        self.outs_size
    }

    pub fn insns(&self) -> &[u16] {
        &self.insns
    }

    pub fn tries(&self) -> &[TryItem] {
        &self.tries
    }

    pub fn const_pool(&self, idx: ConstPoolIdx) -> &ConstPoolEntry {
        &self.const_pool[idx.to_usize()]
    }

    pub fn const_pool_entries(&self) -> &[ConstPoolEntry] {
        &self.const_pool
    }

    pub fn read_opcode(&self, offset: BytecodeOffset) -> Opcode {
        BytecodeCursor::new(&self.insns, offset.to_u32())
            .opcode()
            .expect("reserved opcode")
    }

    pub fn offset_location(&self, offset: u32) -> Location {
        let index = self
            .locations
            .binary_search_by_key(&BytecodeOffset(offset), |&(o, _)| o);
        let index = match index {
            Err(0) => 0,
            Err(index) => index - 1,
            Ok(index) => index,
        };
        self.locations
            .get(index)
            .map(|(_, loc)| *loc)
            .unwrap_or(Location::new(1, 1))
    }
}

/// Decoded packed-switch payload: consecutive keys starting at
/// `first_key`, one signed branch target per key.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedSwitchPayload {
    pub first_key: i32,
    pub targets: Vec<i32>,
}

/// Decoded sparse-switch payload: keys sorted ascending, targets
/// parallel to keys.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseSwitchPayload {
    pub keys: Vec<i32>,
    pub targets: Vec<i32>,
}

/// Decoded array-data payload: raw little-endian element bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayDataPayload {
    pub element_width: u16,
    pub element_count: u32,
    pub data: Vec<u8>,
}
