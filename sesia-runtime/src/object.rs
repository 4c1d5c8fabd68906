use parking_lot::{Mutex, RwLock};

use sesia_bytecode::{ArrayDataPayload, ClassId};

/// A managed reference: a 32-bit handle into the heap. Handle 0 is the
/// null reference, so a zeroed register doubles as a typed null.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ObjRef(u32);

impl ObjRef {
    pub fn null() -> ObjRef {
        ObjRef(0)
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn from_bits(bits: u32) -> ObjRef {
        ObjRef(bits)
    }

    pub fn to_bits(self) -> u32 {
        self.0
    }
}

/// Payload of one heap cell. Instance fields are stored as raw 64-bit
/// slots; which slots hold references is derivable from the owning
/// class's field layout. Float and double arrays share the int and long
/// representations, the array class keeps them apart.
#[derive(Debug)]
pub enum ObjData {
    Instance { fields: Vec<u64> },
    BooleanArray(Vec<u8>),
    ByteArray(Vec<i8>),
    CharArray(Vec<u16>),
    ShortArray(Vec<i16>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    ObjectArray(Vec<ObjRef>),
    Str(String),
    Throwable { message: String },
    ClassMirror(ClassId),
}

#[derive(Debug)]
pub struct Obj {
    pub class_id: ClassId,
    pub data: ObjData,
}

/// The managed heap. Allocation and the write barrier belong to the
/// collector side of the runtime; the interpreter only reaches the heap
/// through the typed accessors below. The heap never moves objects.
pub struct Heap {
    cells: RwLock<Vec<Obj>>,
    limit: usize,
    /// References stores recorded for the collector (remembered set).
    dirty: Mutex<Vec<ObjRef>>,
}

impl Heap {
    pub fn new(limit: usize) -> Heap {
        Heap {
            cells: RwLock::new(Vec::new()),
            limit,
            dirty: Mutex::new(Vec::new()),
        }
    }

    pub fn object_count(&self) -> usize {
        self.cells.read().len()
    }

    /// Allocates a cell; `None` means the heap budget is exhausted.
    pub fn alloc(&self, class_id: ClassId, data: ObjData) -> Option<ObjRef> {
        let mut cells = self.cells.write();
        if cells.len() >= self.limit {
            return None;
        }
        cells.push(Obj { class_id, data });
        Some(ObjRef(cells.len() as u32))
    }

    pub fn alloc_instance(&self, class_id: ClassId, field_count: usize) -> Option<ObjRef> {
        self.alloc(
            class_id,
            ObjData::Instance {
                fields: vec![0; field_count],
            },
        )
    }

    pub fn alloc_string(&self, class_id: ClassId, value: String) -> Option<ObjRef> {
        self.alloc(class_id, ObjData::Str(value))
    }

    pub fn alloc_throwable(&self, class_id: ClassId, message: String) -> Option<ObjRef> {
        self.alloc(class_id, ObjData::Throwable { message })
    }

    pub fn alloc_class_mirror(&self, mirror_class: ClassId, of: ClassId) -> Option<ObjRef> {
        self.alloc(mirror_class, ObjData::ClassMirror(of))
    }

    pub fn class_of(&self, obj: ObjRef) -> ClassId {
        debug_assert!(!obj.is_null());
        self.cells.read()[obj.0 as usize - 1].class_id
    }

    fn with_obj<R>(&self, obj: ObjRef, f: impl FnOnce(&Obj) -> R) -> R {
        debug_assert!(!obj.is_null());
        let cells = self.cells.read();
        f(&cells[obj.0 as usize - 1])
    }

    fn with_obj_mut<R>(&self, obj: ObjRef, f: impl FnOnce(&mut Obj) -> R) -> R {
        debug_assert!(!obj.is_null());
        let mut cells = self.cells.write();
        f(&mut cells[obj.0 as usize - 1])
    }

    pub fn array_length(&self, obj: ObjRef) -> i32 {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::BooleanArray(data) => data.len() as i32,
            ObjData::ByteArray(data) => data.len() as i32,
            ObjData::CharArray(data) => data.len() as i32,
            ObjData::ShortArray(data) => data.len() as i32,
            ObjData::IntArray(data) => data.len() as i32,
            ObjData::LongArray(data) => data.len() as i32,
            ObjData::ObjectArray(data) => data.len() as i32,
            _ => panic!("array-length on non-array object"),
        })
    }

    /// The validated-index predicate of array accesses: true iff `index`
    /// addresses an element.
    pub fn is_valid_index(&self, obj: ObjRef, index: i32) -> bool {
        index >= 0 && index < self.array_length(obj)
    }

    pub fn array_get_boolean(&self, obj: ObjRef, index: i32) -> u8 {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::BooleanArray(data) => data[index as usize],
            _ => panic!("boolean array expected"),
        })
    }

    pub fn array_put_boolean(&self, obj: ObjRef, index: i32, value: u8) {
        self.with_obj_mut(obj, |obj| match &mut obj.data {
            ObjData::BooleanArray(data) => data[index as usize] = value,
            _ => panic!("boolean array expected"),
        })
    }

    pub fn array_get_byte(&self, obj: ObjRef, index: i32) -> i8 {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::ByteArray(data) => data[index as usize],
            _ => panic!("byte array expected"),
        })
    }

    pub fn array_put_byte(&self, obj: ObjRef, index: i32, value: i8) {
        self.with_obj_mut(obj, |obj| match &mut obj.data {
            ObjData::ByteArray(data) => data[index as usize] = value,
            _ => panic!("byte array expected"),
        })
    }

    pub fn array_get_char(&self, obj: ObjRef, index: i32) -> u16 {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::CharArray(data) => data[index as usize],
            _ => panic!("char array expected"),
        })
    }

    pub fn array_put_char(&self, obj: ObjRef, index: i32, value: u16) {
        self.with_obj_mut(obj, |obj| match &mut obj.data {
            ObjData::CharArray(data) => data[index as usize] = value,
            _ => panic!("char array expected"),
        })
    }

    pub fn array_get_short(&self, obj: ObjRef, index: i32) -> i16 {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::ShortArray(data) => data[index as usize],
            _ => panic!("short array expected"),
        })
    }

    pub fn array_put_short(&self, obj: ObjRef, index: i32, value: i16) {
        self.with_obj_mut(obj, |obj| match &mut obj.data {
            ObjData::ShortArray(data) => data[index as usize] = value,
            _ => panic!("short array expected"),
        })
    }

    pub fn array_get_int(&self, obj: ObjRef, index: i32) -> i32 {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::IntArray(data) => data[index as usize],
            _ => panic!("int array expected"),
        })
    }

    pub fn array_put_int(&self, obj: ObjRef, index: i32, value: i32) {
        self.with_obj_mut(obj, |obj| match &mut obj.data {
            ObjData::IntArray(data) => data[index as usize] = value,
            _ => panic!("int array expected"),
        })
    }

    pub fn array_get_long(&self, obj: ObjRef, index: i32) -> i64 {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::LongArray(data) => data[index as usize],
            _ => panic!("long array expected"),
        })
    }

    pub fn array_put_long(&self, obj: ObjRef, index: i32, value: i64) {
        self.with_obj_mut(obj, |obj| match &mut obj.data {
            ObjData::LongArray(data) => data[index as usize] = value,
            _ => panic!("long array expected"),
        })
    }

    pub fn array_get_object(&self, obj: ObjRef, index: i32) -> ObjRef {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::ObjectArray(data) => data[index as usize],
            _ => panic!("object array expected"),
        })
    }

    pub fn array_put_object(&self, obj: ObjRef, index: i32, value: ObjRef) {
        self.with_obj_mut(obj, |obj| match &mut obj.data {
            ObjData::ObjectArray(data) => data[index as usize] = value,
            _ => panic!("object array expected"),
        });
        self.record_write(obj);
    }

    /// Bulk store of raw little-endian payload bytes into an array's
    /// storage. The caller has already checked `element_count` against
    /// the array length.
    pub fn fill_array(&self, obj: ObjRef, payload: &ArrayDataPayload) {
        let count = payload.element_count as usize;
        self.with_obj_mut(obj, |obj| match &mut obj.data {
            ObjData::BooleanArray(data) => {
                assert_eq!(payload.element_width, 1);
                for i in 0..count {
                    data[i] = payload.data[i];
                }
            }
            ObjData::ByteArray(data) => {
                assert_eq!(payload.element_width, 1);
                for i in 0..count {
                    data[i] = payload.data[i] as i8;
                }
            }
            ObjData::CharArray(data) => {
                assert_eq!(payload.element_width, 2);
                for i in 0..count {
                    data[i] = u16::from_le_bytes([payload.data[2 * i], payload.data[2 * i + 1]]);
                }
            }
            ObjData::ShortArray(data) => {
                assert_eq!(payload.element_width, 2);
                for i in 0..count {
                    data[i] =
                        i16::from_le_bytes([payload.data[2 * i], payload.data[2 * i + 1]]);
                }
            }
            ObjData::IntArray(data) => {
                assert_eq!(payload.element_width, 4);
                for i in 0..count {
                    let bytes: [u8; 4] = payload.data[4 * i..4 * i + 4].try_into().unwrap();
                    data[i] = i32::from_le_bytes(bytes);
                }
            }
            ObjData::LongArray(data) => {
                assert_eq!(payload.element_width, 8);
                for i in 0..count {
                    let bytes: [u8; 8] = payload.data[8 * i..8 * i + 8].try_into().unwrap();
                    data[i] = i64::from_le_bytes(bytes);
                }
            }
            _ => panic!("fill-array-data on non-primitive array"),
        });
    }

    pub fn instance_field_get(&self, obj: ObjRef, slot: u32) -> u64 {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::Instance { fields } => fields[slot as usize],
            _ => panic!("instance expected"),
        })
    }

    pub fn instance_field_put(&self, obj: ObjRef, slot: u32, raw: u64) {
        self.with_obj_mut(obj, |obj| match &mut obj.data {
            ObjData::Instance { fields } => fields[slot as usize] = raw,
            _ => panic!("instance expected"),
        })
    }

    pub fn string_value(&self, obj: ObjRef) -> String {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::Str(value) => value.clone(),
            _ => panic!("string expected"),
        })
    }

    pub fn throwable_message(&self, obj: ObjRef) -> Option<String> {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::Throwable { message } => Some(message.clone()),
            _ => None,
        })
    }

    pub fn mirrored_class(&self, obj: ObjRef) -> Option<ClassId> {
        self.with_obj(obj, |obj| match &obj.data {
            ObjData::ClassMirror(id) => Some(*id),
            _ => None,
        })
    }

    /// Write barrier: remembers objects that received a reference store.
    pub fn record_write(&self, obj: ObjRef) {
        self.dirty.lock().push(obj);
    }

    pub fn take_dirty(&self) -> Vec<ObjRef> {
        std::mem::take(&mut *self.dirty.lock())
    }

    /// References held inside an object, for the collector's transitive
    /// marking. Instance slots need the class layout to tell references
    /// from raw bits, so the caller supplies the slot kinds.
    pub fn iterate_object_array_refs(&self, obj: ObjRef, mut callback: impl FnMut(ObjRef)) {
        self.with_obj(obj, |obj| {
            if let ObjData::ObjectArray(data) = &obj.data {
                for &element in data {
                    if !element.is_null() {
                        callback(element);
                    }
                }
            }
        })
    }
}
