use std::ptr;

use fixedbitset::FixedBitSet;

use sesia_bytecode::MethodId;

use crate::object::ObjRef;

/// The one-slot typed buffer that carries a callee's return value until
/// a move-result instruction consumes it, and the value returned by the
/// dispatch loop itself.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Value {
    bits: u64,
    reference: bool,
}

impl Value {
    pub fn int(&self) -> i32 {
        self.bits as u32 as i32
    }

    pub fn set_int(&mut self, value: i32) {
        self.bits = value as u32 as u64;
        self.reference = false;
    }

    pub fn long(&self) -> i64 {
        self.bits as i64
    }

    pub fn set_long(&mut self, value: i64) {
        self.bits = value as u64;
        self.reference = false;
    }

    pub fn float(&self) -> f32 {
        f32::from_bits(self.bits as u32)
    }

    pub fn set_float(&mut self, value: f32) {
        self.bits = value.to_bits() as u64;
        self.reference = false;
    }

    pub fn double(&self) -> f64 {
        f64::from_bits(self.bits)
    }

    pub fn set_double(&mut self, value: f64) {
        self.bits = value.to_bits();
        self.reference = false;
    }

    pub fn obj(&self) -> ObjRef {
        if self.reference {
            ObjRef::from_bits(self.bits as u32)
        } else {
            ObjRef::null()
        }
    }

    pub fn set_obj(&mut self, value: ObjRef) {
        self.bits = value.to_bits() as u64;
        self.reference = true;
    }

    pub fn is_reference(&self) -> bool {
        self.reference
    }
}

/// The interpreter's per-invocation register file plus bookkeeping: the
/// executing method, the published code-unit offset, the receiver root
/// cached outside the register file, and the reference bitmap the
/// collector reads to find roots precisely.
///
/// Frames of one thread form an intrusive caller chain; the thread
/// walks it at safepoints.
pub struct ShadowFrame {
    method_id: MethodId,
    regs: Vec<u32>,
    refs: Option<FixedBitSet>,
    pc: u32,
    this_obj: ObjRef,
    caller: *const ShadowFrame,
}

impl ShadowFrame {
    pub fn new(method_id: MethodId, registers_size: u16) -> ShadowFrame {
        ShadowFrame {
            method_id,
            regs: vec![0; registers_size as usize],
            refs: Some(FixedBitSet::with_capacity(registers_size as usize)),
            pc: 0,
            this_obj: ObjRef::null(),
            caller: ptr::null(),
        }
    }

    /// A frame without a reference bitmap. Such frames belong to
    /// compiled code; handing one to the interpreter is a programmer
    /// error and aborts.
    pub fn without_reference_map(method_id: MethodId, registers_size: u16) -> ShadowFrame {
        ShadowFrame {
            method_id,
            regs: vec![0; registers_size as usize],
            refs: None,
            pc: 0,
            this_obj: ObjRef::null(),
            caller: ptr::null(),
        }
    }

    pub fn method_id(&self) -> MethodId {
        self.method_id
    }

    pub fn num_regs(&self) -> usize {
        self.regs.len()
    }

    pub fn has_reference_map(&self) -> bool {
        self.refs.is_some()
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    pub fn this_object(&self) -> ObjRef {
        self.this_obj
    }

    pub fn set_this_object(&mut self, obj: ObjRef) {
        self.this_obj = obj;
    }

    pub fn caller(&self) -> *const ShadowFrame {
        self.caller
    }

    pub fn set_caller(&mut self, caller: *const ShadowFrame) {
        self.caller = caller;
    }

    fn refs(&self) -> &FixedBitSet {
        self.refs.as_ref().expect("missing reference map")
    }

    fn refs_mut(&mut self) -> &mut FixedBitSet {
        self.refs.as_mut().expect("missing reference map")
    }

    pub fn get_vreg(&self, i: usize) -> i32 {
        self.regs[i] as i32
    }

    pub fn set_vreg(&mut self, i: usize, value: i32) {
        self.regs[i] = value as u32;
        self.refs_mut().set(i, false);
    }

    pub fn get_vreg_float(&self, i: usize) -> f32 {
        f32::from_bits(self.regs[i])
    }

    pub fn set_vreg_float(&mut self, i: usize, value: f32) {
        self.regs[i] = value.to_bits();
        self.refs_mut().set(i, false);
    }

    pub fn get_vreg_long(&self, i: usize) -> i64 {
        (self.regs[i] as u64 | (self.regs[i + 1] as u64) << 32) as i64
    }

    pub fn set_vreg_long(&mut self, i: usize, value: i64) {
        let bits = value as u64;
        self.regs[i] = bits as u32;
        self.regs[i + 1] = (bits >> 32) as u32;
        let refs = self.refs_mut();
        refs.set(i, false);
        refs.set(i + 1, false);
    }

    pub fn get_vreg_double(&self, i: usize) -> f64 {
        f64::from_bits(self.get_vreg_long(i) as u64)
    }

    pub fn set_vreg_double(&mut self, i: usize, value: f64) {
        self.set_vreg_long(i, value.to_bits() as i64);
    }

    /// Reads a register as a reference. A register whose reference bit
    /// is clear reads as null, regardless of its raw bits.
    pub fn get_vreg_reference(&self, i: usize) -> ObjRef {
        if self.refs().contains(i) {
            ObjRef::from_bits(self.regs[i])
        } else {
            ObjRef::null()
        }
    }

    pub fn set_vreg_reference(&mut self, i: usize, value: ObjRef) {
        self.regs[i] = value.to_bits();
        self.refs_mut().set(i, true);
    }

    /// Marks a register as holding a null-capable zero: the raw word is
    /// already zero, only the reference bit is added.
    pub fn tag_null(&mut self, i: usize) {
        debug_assert_eq!(self.regs[i], 0);
        self.refs_mut().set(i, true);
    }

    /// Copies one register (raw word and reference bit) out of another
    /// frame, used when passing arguments into a callee frame.
    pub fn copy_register_from(&mut self, other: &ShadowFrame, src: usize, dst: usize) {
        self.regs[dst] = other.regs[src];
        let is_ref = other.refs().contains(src);
        self.refs_mut().set(dst, is_ref);
    }

    /// The receiver of a non-static method: the first in-register.
    pub fn arg_object(&self, ins_size: u16) -> ObjRef {
        if ins_size == 0 {
            ObjRef::null()
        } else {
            self.get_vreg_reference(self.regs.len() - ins_size as usize)
        }
    }

    /// Every root this frame exposes to the collector: registers with a
    /// set reference bit plus the cached receiver.
    pub fn iterate_references(&self, mut callback: impl FnMut(ObjRef)) {
        let refs = self.refs();
        for i in refs.ones() {
            let obj = ObjRef::from_bits(self.regs[i]);
            if !obj.is_null() {
                callback(obj);
            }
        }
        if !self.this_obj.is_null() {
            callback(self.this_obj);
        }
    }
}
