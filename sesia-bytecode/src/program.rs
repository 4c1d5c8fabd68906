use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::data::CodeItem;
use bincode::{de::Decoder, enc::Encoder, Decode, Encode};

#[repr(transparent)]
pub struct Id<T>(u32, PhantomData<T>);

impl<T> Id<T> {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn index_as_u32(self) -> u32 {
        self.0
    }
}

impl<T> From<usize> for Id<T> {
    fn from(value: usize) -> Self {
        Id(value.try_into().expect("overflow"), PhantomData)
    }
}

impl<T> From<u32> for Id<T> {
    fn from(value: u32) -> Self {
        Id(value, PhantomData)
    }
}

impl<T> Copy for Id<T> {}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.0).finish()
    }
}

impl<T> Encode for Id<T> {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), bincode::error::EncodeError> {
        self.0.encode(encoder)
    }
}

impl<Context, T> Decode<Context> for Id<T> {
    fn decode<D: Decoder<Context = Context>>(
        decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        Ok(Id(u32::decode(decoder)?, PhantomData))
    }
}

impl<'de, Context, T> bincode::BorrowDecode<'de, Context> for Id<T> {
    fn borrow_decode<D: bincode::de::BorrowDecoder<'de, Context = Context>>(
        decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        Ok(Id(
            bincode::BorrowDecode::borrow_decode(decoder)?,
            PhantomData,
        ))
    }
}

pub type ClassId = Id<ClassData>;
pub type MethodId = Id<MethodData>;
pub type FieldId = Id<FieldData>;

/// Storage kind of a field or array element.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Decode, Encode)]
pub enum FieldKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Object,
}

impl FieldKind {
    pub fn is_wide(self) -> bool {
        match self {
            FieldKind::Long | FieldKind::Double => true,
            _ => false,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Decode, Encode)]
pub enum ElementType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Class(ClassId),
}

impl ElementType {
    pub fn is_reference(self) -> bool {
        match self {
            ElementType::Class(_) => true,
            _ => false,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Decode, Encode)]
pub enum ClassKind {
    Object,
    Array(ElementType),
}

#[derive(Clone, Debug, Decode, Encode)]
pub struct ClassData {
    pub name: String,
    pub superclass: Option<ClassId>,
    pub interfaces: Vec<ClassId>,
    pub kind: ClassKind,
    pub is_private: bool,
    /// Instance field layout, slot order.
    pub instance_fields: Vec<FieldId>,
    /// Static field layout, slot order.
    pub static_fields: Vec<FieldId>,
    pub vtable: Vec<MethodId>,
}

impl ClassData {
    pub fn is_array(&self) -> bool {
        match self.kind {
            ClassKind::Array(_) => true,
            ClassKind::Object => false,
        }
    }

    pub fn element_type(&self) -> Option<ElementType> {
        match self.kind {
            ClassKind::Array(element) => Some(element),
            ClassKind::Object => None,
        }
    }
}

#[derive(Clone, Debug, Decode, Encode)]
pub struct MethodData {
    pub name: String,
    pub class_id: ClassId,
    pub is_static: bool,
    pub is_private: bool,
    /// Index into the owning class's vtable, for virtually dispatched
    /// methods.
    pub vtable_index: Option<u32>,
    pub code: Option<CodeItem>,
}

#[derive(Clone, Debug, Decode, Encode)]
pub struct FieldData {
    pub name: String,
    pub class_id: ClassId,
    pub kind: FieldKind,
    pub is_static: bool,
    pub is_private: bool,
    /// Slot in the owning class's instance or static layout.
    pub slot: u32,
}

/// A fully resolved program: every method body references classes,
/// methods and fields through ids into these tables.
#[derive(Clone, Debug, Decode, Encode)]
pub struct Program {
    pub classes: Vec<ClassData>,
    pub methods: Vec<MethodData>,
    pub fields: Vec<FieldData>,
}

impl Program {
    pub fn new() -> Program {
        Program {
            classes: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn class(&self, id: ClassId) -> &ClassData {
        &self.classes[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &MethodData {
        &self.methods[id.index()]
    }

    pub fn field(&self, id: FieldId) -> &FieldData {
        &self.fields[id.index()]
    }

    pub fn add_class(&mut self, class: ClassData) -> ClassId {
        let id = ClassId::from(self.classes.len());
        self.classes.push(class);
        id
    }

    pub fn add_method(&mut self, method: MethodData) -> MethodId {
        let id = MethodId::from(self.methods.len());
        self.methods.push(method);
        id
    }

    pub fn add_field(&mut self, field: FieldData) -> FieldId {
        let id = FieldId::from(self.fields.len());
        self.fields.push(field);
        id
    }

    /// Checks whether a value of class `source` can be stored where
    /// `target` is expected. Reference arrays are covariant, primitive
    /// arrays are invariant, and every array is assignable to the root
    /// class.
    pub fn is_assignable(&self, target: ClassId, source: ClassId) -> bool {
        if target == source {
            return true;
        }

        let target_class = self.class(target);
        let source_class = self.class(source);

        match (&target_class.kind, &source_class.kind) {
            (ClassKind::Object, ClassKind::Object) => self.is_supertype(target, source),
            (ClassKind::Object, ClassKind::Array(_)) => target_class.superclass.is_none(),
            (ClassKind::Array(target_elem), ClassKind::Array(source_elem)) => {
                match (target_elem, source_elem) {
                    (ElementType::Class(t), ElementType::Class(s)) => self.is_assignable(*t, *s),
                    (t, s) => t == s,
                }
            }
            (ClassKind::Array(_), ClassKind::Object) => false,
        }
    }

    fn is_supertype(&self, target: ClassId, source: ClassId) -> bool {
        let mut current = Some(source);

        while let Some(cls_id) = current {
            if cls_id == target {
                return true;
            }

            let cls = self.class(cls_id);

            for &iface in &cls.interfaces {
                if iface == target || self.is_supertype(target, iface) {
                    return true;
                }
            }

            current = cls.superclass;
        }

        false
    }
}
