use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Identifying unit of a packed-switch payload (low byte is Nop).
pub const PACKED_SWITCH_PAYLOAD_IDENT: u16 = 0x0100;
/// Identifying unit of a sparse-switch payload.
pub const SPARSE_SWITCH_PAYLOAD_IDENT: u16 = 0x0200;
/// Identifying unit of an array-data payload.
pub const ARRAY_DATA_PAYLOAD_IDENT: u16 = 0x0300;

/// The instruction set. Each opcode occupies the low byte of an
/// instruction's first code unit. Byte values without a variant here
/// (0x3e-0x43, 0x79, 0x7a, 0xeb-0xff) are reserved and must never be
/// executed.
#[derive(TryFromPrimitive, IntoPrimitive, Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Opcode {
    Nop = 0x00,
    Move = 0x01,
    MoveFrom16 = 0x02,
    Move16 = 0x03,
    MoveWide = 0x04,
    MoveWideFrom16 = 0x05,
    MoveWide16 = 0x06,
    MoveObject = 0x07,
    MoveObjectFrom16 = 0x08,
    MoveObject16 = 0x09,
    MoveResult = 0x0a,
    MoveResultWide = 0x0b,
    MoveResultObject = 0x0c,
    MoveException = 0x0d,
    ReturnVoid = 0x0e,
    Return = 0x0f,
    ReturnWide = 0x10,
    ReturnObject = 0x11,
    Const4 = 0x12,
    Const16 = 0x13,
    Const = 0x14,
    ConstHigh16 = 0x15,
    ConstWide16 = 0x16,
    ConstWide32 = 0x17,
    ConstWide = 0x18,
    ConstWideHigh16 = 0x19,
    ConstString = 0x1a,
    ConstStringJumbo = 0x1b,
    ConstClass = 0x1c,
    MonitorEnter = 0x1d,
    MonitorExit = 0x1e,
    CheckCast = 0x1f,
    InstanceOf = 0x20,
    ArrayLength = 0x21,
    NewInstance = 0x22,
    NewArray = 0x23,
    FilledNewArray = 0x24,
    FilledNewArrayRange = 0x25,
    FillArrayData = 0x26,
    Throw = 0x27,
    Goto = 0x28,
    Goto16 = 0x29,
    Goto32 = 0x2a,
    PackedSwitch = 0x2b,
    SparseSwitch = 0x2c,
    CmplFloat = 0x2d,
    CmpgFloat = 0x2e,
    CmplDouble = 0x2f,
    CmpgDouble = 0x30,
    CmpLong = 0x31,
    IfEq = 0x32,
    IfNe = 0x33,
    IfLt = 0x34,
    IfGe = 0x35,
    IfGt = 0x36,
    IfLe = 0x37,
    IfEqz = 0x38,
    IfNez = 0x39,
    IfLtz = 0x3a,
    IfGez = 0x3b,
    IfGtz = 0x3c,
    IfLez = 0x3d,
    Aget = 0x44,
    AgetWide = 0x45,
    AgetObject = 0x46,
    AgetBoolean = 0x47,
    AgetByte = 0x48,
    AgetChar = 0x49,
    AgetShort = 0x4a,
    Aput = 0x4b,
    AputWide = 0x4c,
    AputObject = 0x4d,
    AputBoolean = 0x4e,
    AputByte = 0x4f,
    AputChar = 0x50,
    AputShort = 0x51,
    Iget = 0x52,
    IgetWide = 0x53,
    IgetObject = 0x54,
    IgetBoolean = 0x55,
    IgetByte = 0x56,
    IgetChar = 0x57,
    IgetShort = 0x58,
    Iput = 0x59,
    IputWide = 0x5a,
    IputObject = 0x5b,
    IputBoolean = 0x5c,
    IputByte = 0x5d,
    IputChar = 0x5e,
    IputShort = 0x5f,
    Sget = 0x60,
    SgetWide = 0x61,
    SgetObject = 0x62,
    SgetBoolean = 0x63,
    SgetByte = 0x64,
    SgetChar = 0x65,
    SgetShort = 0x66,
    Sput = 0x67,
    SputWide = 0x68,
    SputObject = 0x69,
    SputBoolean = 0x6a,
    SputByte = 0x6b,
    SputChar = 0x6c,
    SputShort = 0x6d,
    InvokeVirtual = 0x6e,
    InvokeSuper = 0x6f,
    InvokeDirect = 0x70,
    InvokeStatic = 0x71,
    InvokeInterface = 0x72,
    ReturnVoidBarrier = 0x73,
    InvokeVirtualRange = 0x74,
    InvokeSuperRange = 0x75,
    InvokeDirectRange = 0x76,
    InvokeStaticRange = 0x77,
    InvokeInterfaceRange = 0x78,
    NegInt = 0x7b,
    NotInt = 0x7c,
    NegLong = 0x7d,
    NotLong = 0x7e,
    NegFloat = 0x7f,
    NegDouble = 0x80,
    IntToLong = 0x81,
    IntToFloat = 0x82,
    IntToDouble = 0x83,
    LongToInt = 0x84,
    LongToFloat = 0x85,
    LongToDouble = 0x86,
    FloatToInt = 0x87,
    FloatToLong = 0x88,
    FloatToDouble = 0x89,
    DoubleToInt = 0x8a,
    DoubleToLong = 0x8b,
    DoubleToFloat = 0x8c,
    IntToByte = 0x8d,
    IntToChar = 0x8e,
    IntToShort = 0x8f,
    AddInt = 0x90,
    SubInt = 0x91,
    MulInt = 0x92,
    DivInt = 0x93,
    RemInt = 0x94,
    AndInt = 0x95,
    OrInt = 0x96,
    XorInt = 0x97,
    ShlInt = 0x98,
    ShrInt = 0x99,
    UshrInt = 0x9a,
    AddLong = 0x9b,
    SubLong = 0x9c,
    MulLong = 0x9d,
    DivLong = 0x9e,
    RemLong = 0x9f,
    AndLong = 0xa0,
    OrLong = 0xa1,
    XorLong = 0xa2,
    ShlLong = 0xa3,
    ShrLong = 0xa4,
    UshrLong = 0xa5,
    AddFloat = 0xa6,
    SubFloat = 0xa7,
    MulFloat = 0xa8,
    DivFloat = 0xa9,
    RemFloat = 0xaa,
    AddDouble = 0xab,
    SubDouble = 0xac,
    MulDouble = 0xad,
    DivDouble = 0xae,
    RemDouble = 0xaf,
    AddInt2Addr = 0xb0,
    SubInt2Addr = 0xb1,
    MulInt2Addr = 0xb2,
    DivInt2Addr = 0xb3,
    RemInt2Addr = 0xb4,
    AndInt2Addr = 0xb5,
    OrInt2Addr = 0xb6,
    XorInt2Addr = 0xb7,
    ShlInt2Addr = 0xb8,
    ShrInt2Addr = 0xb9,
    UshrInt2Addr = 0xba,
    AddLong2Addr = 0xbb,
    SubLong2Addr = 0xbc,
    MulLong2Addr = 0xbd,
    DivLong2Addr = 0xbe,
    RemLong2Addr = 0xbf,
    AndLong2Addr = 0xc0,
    OrLong2Addr = 0xc1,
    XorLong2Addr = 0xc2,
    ShlLong2Addr = 0xc3,
    ShrLong2Addr = 0xc4,
    UshrLong2Addr = 0xc5,
    AddFloat2Addr = 0xc6,
    SubFloat2Addr = 0xc7,
    MulFloat2Addr = 0xc8,
    DivFloat2Addr = 0xc9,
    RemFloat2Addr = 0xca,
    AddDouble2Addr = 0xcb,
    SubDouble2Addr = 0xcc,
    MulDouble2Addr = 0xcd,
    DivDouble2Addr = 0xce,
    RemDouble2Addr = 0xcf,
    AddIntLit16 = 0xd0,
    RsubInt = 0xd1,
    MulIntLit16 = 0xd2,
    DivIntLit16 = 0xd3,
    RemIntLit16 = 0xd4,
    AndIntLit16 = 0xd5,
    OrIntLit16 = 0xd6,
    XorIntLit16 = 0xd7,
    AddIntLit8 = 0xd8,
    RsubIntLit8 = 0xd9,
    MulIntLit8 = 0xda,
    DivIntLit8 = 0xdb,
    RemIntLit8 = 0xdc,
    AndIntLit8 = 0xdd,
    OrIntLit8 = 0xde,
    XorIntLit8 = 0xdf,
    ShlIntLit8 = 0xe0,
    ShrIntLit8 = 0xe1,
    UshrIntLit8 = 0xe2,
    IgetQuick = 0xe3,
    IgetWideQuick = 0xe4,
    IgetObjectQuick = 0xe5,
    IputQuick = 0xe6,
    IputWideQuick = 0xe7,
    IputObjectQuick = 0xe8,
    InvokeVirtualQuick = 0xe9,
    InvokeVirtualRangeQuick = 0xea,
}

/// Operand layouts. The first digit is the size in code units, the
/// second the register count, the letter the extra operand kind.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InstructionFormat {
    F10x,
    F12x,
    F11n,
    F11x,
    F10t,
    F20t,
    F22x,
    F21t,
    F21s,
    F21h,
    F21c,
    F23x,
    F22b,
    F22t,
    F22s,
    F22c,
    F30t,
    F32x,
    F31i,
    F31t,
    F31c,
    F35c,
    F3rc,
    F51l,
}

impl InstructionFormat {
    pub fn size_in_code_units(self) -> u32 {
        match self {
            InstructionFormat::F10x
            | InstructionFormat::F12x
            | InstructionFormat::F11n
            | InstructionFormat::F11x
            | InstructionFormat::F10t => 1,
            InstructionFormat::F20t
            | InstructionFormat::F22x
            | InstructionFormat::F21t
            | InstructionFormat::F21s
            | InstructionFormat::F21h
            | InstructionFormat::F21c
            | InstructionFormat::F23x
            | InstructionFormat::F22b
            | InstructionFormat::F22t
            | InstructionFormat::F22s
            | InstructionFormat::F22c => 2,
            InstructionFormat::F30t
            | InstructionFormat::F32x
            | InstructionFormat::F31i
            | InstructionFormat::F31t
            | InstructionFormat::F31c
            | InstructionFormat::F35c
            | InstructionFormat::F3rc => 3,
            InstructionFormat::F51l => 5,
        }
    }
}

impl Opcode {
    pub fn format(self) -> InstructionFormat {
        match self {
            Opcode::Nop | Opcode::ReturnVoid | Opcode::ReturnVoidBarrier => {
                InstructionFormat::F10x
            }

            Opcode::Move
            | Opcode::MoveWide
            | Opcode::MoveObject
            | Opcode::ArrayLength
            | Opcode::NegInt
            | Opcode::NotInt
            | Opcode::NegLong
            | Opcode::NotLong
            | Opcode::NegFloat
            | Opcode::NegDouble
            | Opcode::IntToLong
            | Opcode::IntToFloat
            | Opcode::IntToDouble
            | Opcode::LongToInt
            | Opcode::LongToFloat
            | Opcode::LongToDouble
            | Opcode::FloatToInt
            | Opcode::FloatToLong
            | Opcode::FloatToDouble
            | Opcode::DoubleToInt
            | Opcode::DoubleToLong
            | Opcode::DoubleToFloat
            | Opcode::IntToByte
            | Opcode::IntToChar
            | Opcode::IntToShort
            | Opcode::AddInt2Addr
            | Opcode::SubInt2Addr
            | Opcode::MulInt2Addr
            | Opcode::DivInt2Addr
            | Opcode::RemInt2Addr
            | Opcode::AndInt2Addr
            | Opcode::OrInt2Addr
            | Opcode::XorInt2Addr
            | Opcode::ShlInt2Addr
            | Opcode::ShrInt2Addr
            | Opcode::UshrInt2Addr
            | Opcode::AddLong2Addr
            | Opcode::SubLong2Addr
            | Opcode::MulLong2Addr
            | Opcode::DivLong2Addr
            | Opcode::RemLong2Addr
            | Opcode::AndLong2Addr
            | Opcode::OrLong2Addr
            | Opcode::XorLong2Addr
            | Opcode::ShlLong2Addr
            | Opcode::ShrLong2Addr
            | Opcode::UshrLong2Addr
            | Opcode::AddFloat2Addr
            | Opcode::SubFloat2Addr
            | Opcode::MulFloat2Addr
            | Opcode::DivFloat2Addr
            | Opcode::RemFloat2Addr
            | Opcode::AddDouble2Addr
            | Opcode::SubDouble2Addr
            | Opcode::MulDouble2Addr
            | Opcode::DivDouble2Addr
            | Opcode::RemDouble2Addr => InstructionFormat::F12x,

            Opcode::Const4 => InstructionFormat::F11n,

            Opcode::MoveResult
            | Opcode::MoveResultWide
            | Opcode::MoveResultObject
            | Opcode::MoveException
            | Opcode::Return
            | Opcode::ReturnWide
            | Opcode::ReturnObject
            | Opcode::MonitorEnter
            | Opcode::MonitorExit
            | Opcode::Throw => InstructionFormat::F11x,

            Opcode::Goto => InstructionFormat::F10t,
            Opcode::Goto16 => InstructionFormat::F20t,
            Opcode::Goto32 => InstructionFormat::F30t,

            Opcode::MoveFrom16 | Opcode::MoveWideFrom16 | Opcode::MoveObjectFrom16 => {
                InstructionFormat::F22x
            }
            Opcode::Move16 | Opcode::MoveWide16 | Opcode::MoveObject16 => InstructionFormat::F32x,

            Opcode::IfEqz
            | Opcode::IfNez
            | Opcode::IfLtz
            | Opcode::IfGez
            | Opcode::IfGtz
            | Opcode::IfLez => InstructionFormat::F21t,

            Opcode::Const16 | Opcode::ConstWide16 => InstructionFormat::F21s,
            Opcode::ConstHigh16 | Opcode::ConstWideHigh16 => InstructionFormat::F21h,

            Opcode::ConstString
            | Opcode::ConstClass
            | Opcode::CheckCast
            | Opcode::NewInstance
            | Opcode::Sget
            | Opcode::SgetWide
            | Opcode::SgetObject
            | Opcode::SgetBoolean
            | Opcode::SgetByte
            | Opcode::SgetChar
            | Opcode::SgetShort
            | Opcode::Sput
            | Opcode::SputWide
            | Opcode::SputObject
            | Opcode::SputBoolean
            | Opcode::SputByte
            | Opcode::SputChar
            | Opcode::SputShort => InstructionFormat::F21c,

            Opcode::CmplFloat
            | Opcode::CmpgFloat
            | Opcode::CmplDouble
            | Opcode::CmpgDouble
            | Opcode::CmpLong
            | Opcode::Aget
            | Opcode::AgetWide
            | Opcode::AgetObject
            | Opcode::AgetBoolean
            | Opcode::AgetByte
            | Opcode::AgetChar
            | Opcode::AgetShort
            | Opcode::Aput
            | Opcode::AputWide
            | Opcode::AputObject
            | Opcode::AputBoolean
            | Opcode::AputByte
            | Opcode::AputChar
            | Opcode::AputShort
            | Opcode::AddInt
            | Opcode::SubInt
            | Opcode::MulInt
            | Opcode::DivInt
            | Opcode::RemInt
            | Opcode::AndInt
            | Opcode::OrInt
            | Opcode::XorInt
            | Opcode::ShlInt
            | Opcode::ShrInt
            | Opcode::UshrInt
            | Opcode::AddLong
            | Opcode::SubLong
            | Opcode::MulLong
            | Opcode::DivLong
            | Opcode::RemLong
            | Opcode::AndLong
            | Opcode::OrLong
            | Opcode::XorLong
            | Opcode::ShlLong
            | Opcode::ShrLong
            | Opcode::UshrLong
            | Opcode::AddFloat
            | Opcode::SubFloat
            | Opcode::MulFloat
            | Opcode::DivFloat
            | Opcode::RemFloat
            | Opcode::AddDouble
            | Opcode::SubDouble
            | Opcode::MulDouble
            | Opcode::DivDouble
            | Opcode::RemDouble => InstructionFormat::F23x,

            Opcode::AddIntLit8
            | Opcode::RsubIntLit8
            | Opcode::MulIntLit8
            | Opcode::DivIntLit8
            | Opcode::RemIntLit8
            | Opcode::AndIntLit8
            | Opcode::OrIntLit8
            | Opcode::XorIntLit8
            | Opcode::ShlIntLit8
            | Opcode::ShrIntLit8
            | Opcode::UshrIntLit8 => InstructionFormat::F22b,

            Opcode::IfEq | Opcode::IfNe | Opcode::IfLt | Opcode::IfGe | Opcode::IfGt
            | Opcode::IfLe => InstructionFormat::F22t,

            Opcode::AddIntLit16
            | Opcode::RsubInt
            | Opcode::MulIntLit16
            | Opcode::DivIntLit16
            | Opcode::RemIntLit16
            | Opcode::AndIntLit16
            | Opcode::OrIntLit16
            | Opcode::XorIntLit16 => InstructionFormat::F22s,

            Opcode::InstanceOf
            | Opcode::NewArray
            | Opcode::Iget
            | Opcode::IgetWide
            | Opcode::IgetObject
            | Opcode::IgetBoolean
            | Opcode::IgetByte
            | Opcode::IgetChar
            | Opcode::IgetShort
            | Opcode::Iput
            | Opcode::IputWide
            | Opcode::IputObject
            | Opcode::IputBoolean
            | Opcode::IputByte
            | Opcode::IputChar
            | Opcode::IputShort
            | Opcode::IgetQuick
            | Opcode::IgetWideQuick
            | Opcode::IgetObjectQuick
            | Opcode::IputQuick
            | Opcode::IputWideQuick
            | Opcode::IputObjectQuick => InstructionFormat::F22c,

            Opcode::Const | Opcode::ConstWide32 => InstructionFormat::F31i,
            Opcode::FillArrayData | Opcode::PackedSwitch | Opcode::SparseSwitch => {
                InstructionFormat::F31t
            }
            Opcode::ConstStringJumbo => InstructionFormat::F31c,

            Opcode::FilledNewArray
            | Opcode::InvokeVirtual
            | Opcode::InvokeSuper
            | Opcode::InvokeDirect
            | Opcode::InvokeStatic
            | Opcode::InvokeInterface
            | Opcode::InvokeVirtualQuick => InstructionFormat::F35c,

            Opcode::FilledNewArrayRange
            | Opcode::InvokeVirtualRange
            | Opcode::InvokeSuperRange
            | Opcode::InvokeDirectRange
            | Opcode::InvokeStaticRange
            | Opcode::InvokeInterfaceRange
            | Opcode::InvokeVirtualRangeQuick => InstructionFormat::F3rc,

            Opcode::ConstWide => InstructionFormat::F51l,
        }
    }

    pub fn size_in_code_units(self) -> u32 {
        self.format().size_in_code_units()
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::Move => "move",
            Opcode::MoveFrom16 => "move/from16",
            Opcode::Move16 => "move/16",
            Opcode::MoveWide => "move-wide",
            Opcode::MoveWideFrom16 => "move-wide/from16",
            Opcode::MoveWide16 => "move-wide/16",
            Opcode::MoveObject => "move-object",
            Opcode::MoveObjectFrom16 => "move-object/from16",
            Opcode::MoveObject16 => "move-object/16",
            Opcode::MoveResult => "move-result",
            Opcode::MoveResultWide => "move-result-wide",
            Opcode::MoveResultObject => "move-result-object",
            Opcode::MoveException => "move-exception",
            Opcode::ReturnVoid => "return-void",
            Opcode::Return => "return",
            Opcode::ReturnWide => "return-wide",
            Opcode::ReturnObject => "return-object",
            Opcode::Const4 => "const/4",
            Opcode::Const16 => "const/16",
            Opcode::Const => "const",
            Opcode::ConstHigh16 => "const/high16",
            Opcode::ConstWide16 => "const-wide/16",
            Opcode::ConstWide32 => "const-wide/32",
            Opcode::ConstWide => "const-wide",
            Opcode::ConstWideHigh16 => "const-wide/high16",
            Opcode::ConstString => "const-string",
            Opcode::ConstStringJumbo => "const-string/jumbo",
            Opcode::ConstClass => "const-class",
            Opcode::MonitorEnter => "monitor-enter",
            Opcode::MonitorExit => "monitor-exit",
            Opcode::CheckCast => "check-cast",
            Opcode::InstanceOf => "instance-of",
            Opcode::ArrayLength => "array-length",
            Opcode::NewInstance => "new-instance",
            Opcode::NewArray => "new-array",
            Opcode::FilledNewArray => "filled-new-array",
            Opcode::FilledNewArrayRange => "filled-new-array/range",
            Opcode::FillArrayData => "fill-array-data",
            Opcode::Throw => "throw",
            Opcode::Goto => "goto",
            Opcode::Goto16 => "goto/16",
            Opcode::Goto32 => "goto/32",
            Opcode::PackedSwitch => "packed-switch",
            Opcode::SparseSwitch => "sparse-switch",
            Opcode::CmplFloat => "cmpl-float",
            Opcode::CmpgFloat => "cmpg-float",
            Opcode::CmplDouble => "cmpl-double",
            Opcode::CmpgDouble => "cmpg-double",
            Opcode::CmpLong => "cmp-long",
            Opcode::IfEq => "if-eq",
            Opcode::IfNe => "if-ne",
            Opcode::IfLt => "if-lt",
            Opcode::IfGe => "if-ge",
            Opcode::IfGt => "if-gt",
            Opcode::IfLe => "if-le",
            Opcode::IfEqz => "if-eqz",
            Opcode::IfNez => "if-nez",
            Opcode::IfLtz => "if-ltz",
            Opcode::IfGez => "if-gez",
            Opcode::IfGtz => "if-gtz",
            Opcode::IfLez => "if-lez",
            Opcode::Aget => "aget",
            Opcode::AgetWide => "aget-wide",
            Opcode::AgetObject => "aget-object",
            Opcode::AgetBoolean => "aget-boolean",
            Opcode::AgetByte => "aget-byte",
            Opcode::AgetChar => "aget-char",
            Opcode::AgetShort => "aget-short",
            Opcode::Aput => "aput",
            Opcode::AputWide => "aput-wide",
            Opcode::AputObject => "aput-object",
            Opcode::AputBoolean => "aput-boolean",
            Opcode::AputByte => "aput-byte",
            Opcode::AputChar => "aput-char",
            Opcode::AputShort => "aput-short",
            Opcode::Iget => "iget",
            Opcode::IgetWide => "iget-wide",
            Opcode::IgetObject => "iget-object",
            Opcode::IgetBoolean => "iget-boolean",
            Opcode::IgetByte => "iget-byte",
            Opcode::IgetChar => "iget-char",
            Opcode::IgetShort => "iget-short",
            Opcode::Iput => "iput",
            Opcode::IputWide => "iput-wide",
            Opcode::IputObject => "iput-object",
            Opcode::IputBoolean => "iput-boolean",
            Opcode::IputByte => "iput-byte",
            Opcode::IputChar => "iput-char",
            Opcode::IputShort => "iput-short",
            Opcode::Sget => "sget",
            Opcode::SgetWide => "sget-wide",
            Opcode::SgetObject => "sget-object",
            Opcode::SgetBoolean => "sget-boolean",
            Opcode::SgetByte => "sget-byte",
            Opcode::SgetChar => "sget-char",
            Opcode::SgetShort => "sget-short",
            Opcode::Sput => "sput",
            Opcode::SputWide => "sput-wide",
            Opcode::SputObject => "sput-object",
            Opcode::SputBoolean => "sput-boolean",
            Opcode::SputByte => "sput-byte",
            Opcode::SputChar => "sput-char",
            Opcode::SputShort => "sput-short",
            Opcode::InvokeVirtual => "invoke-virtual",
            Opcode::InvokeSuper => "invoke-super",
            Opcode::InvokeDirect => "invoke-direct",
            Opcode::InvokeStatic => "invoke-static",
            Opcode::InvokeInterface => "invoke-interface",
            Opcode::ReturnVoidBarrier => "return-void-barrier",
            Opcode::InvokeVirtualRange => "invoke-virtual/range",
            Opcode::InvokeSuperRange => "invoke-super/range",
            Opcode::InvokeDirectRange => "invoke-direct/range",
            Opcode::InvokeStaticRange => "invoke-static/range",
            Opcode::InvokeInterfaceRange => "invoke-interface/range",
            Opcode::NegInt => "neg-int",
            Opcode::NotInt => "not-int",
            Opcode::NegLong => "neg-long",
            Opcode::NotLong => "not-long",
            Opcode::NegFloat => "neg-float",
            Opcode::NegDouble => "neg-double",
            Opcode::IntToLong => "int-to-long",
            Opcode::IntToFloat => "int-to-float",
            Opcode::IntToDouble => "int-to-double",
            Opcode::LongToInt => "long-to-int",
            Opcode::LongToFloat => "long-to-float",
            Opcode::LongToDouble => "long-to-double",
            Opcode::FloatToInt => "float-to-int",
            Opcode::FloatToLong => "float-to-long",
            Opcode::FloatToDouble => "float-to-double",
            Opcode::DoubleToInt => "double-to-int",
            Opcode::DoubleToLong => "double-to-long",
            Opcode::DoubleToFloat => "double-to-float",
            Opcode::IntToByte => "int-to-byte",
            Opcode::IntToChar => "int-to-char",
            Opcode::IntToShort => "int-to-short",
            Opcode::AddInt => "add-int",
            Opcode::SubInt => "sub-int",
            Opcode::MulInt => "mul-int",
            Opcode::DivInt => "div-int",
            Opcode::RemInt => "rem-int",
            Opcode::AndInt => "and-int",
            Opcode::OrInt => "or-int",
            Opcode::XorInt => "xor-int",
            Opcode::ShlInt => "shl-int",
            Opcode::ShrInt => "shr-int",
            Opcode::UshrInt => "ushr-int",
            Opcode::AddLong => "add-long",
            Opcode::SubLong => "sub-long",
            Opcode::MulLong => "mul-long",
            Opcode::DivLong => "div-long",
            Opcode::RemLong => "rem-long",
            Opcode::AndLong => "and-long",
            Opcode::OrLong => "or-long",
            Opcode::XorLong => "xor-long",
            Opcode::ShlLong => "shl-long",
            Opcode::ShrLong => "shr-long",
            Opcode::UshrLong => "ushr-long",
            Opcode::AddFloat => "add-float",
            Opcode::SubFloat => "sub-float",
            Opcode::MulFloat => "mul-float",
            Opcode::DivFloat => "div-float",
            Opcode::RemFloat => "rem-float",
            Opcode::AddDouble => "add-double",
            Opcode::SubDouble => "sub-double",
            Opcode::MulDouble => "mul-double",
            Opcode::DivDouble => "div-double",
            Opcode::RemDouble => "rem-double",
            Opcode::AddInt2Addr => "add-int/2addr",
            Opcode::SubInt2Addr => "sub-int/2addr",
            Opcode::MulInt2Addr => "mul-int/2addr",
            Opcode::DivInt2Addr => "div-int/2addr",
            Opcode::RemInt2Addr => "rem-int/2addr",
            Opcode::AndInt2Addr => "and-int/2addr",
            Opcode::OrInt2Addr => "or-int/2addr",
            Opcode::XorInt2Addr => "xor-int/2addr",
            Opcode::ShlInt2Addr => "shl-int/2addr",
            Opcode::ShrInt2Addr => "shr-int/2addr",
            Opcode::UshrInt2Addr => "ushr-int/2addr",
            Opcode::AddLong2Addr => "add-long/2addr",
            Opcode::SubLong2Addr => "sub-long/2addr",
            Opcode::MulLong2Addr => "mul-long/2addr",
            Opcode::DivLong2Addr => "div-long/2addr",
            Opcode::RemLong2Addr => "rem-long/2addr",
            Opcode::AndLong2Addr => "and-long/2addr",
            Opcode::OrLong2Addr => "or-long/2addr",
            Opcode::XorLong2Addr => "xor-long/2addr",
            Opcode::ShlLong2Addr => "shl-long/2addr",
            Opcode::ShrLong2Addr => "shr-long/2addr",
            Opcode::UshrLong2Addr => "ushr-long/2addr",
            Opcode::AddFloat2Addr => "add-float/2addr",
            Opcode::SubFloat2Addr => "sub-float/2addr",
            Opcode::MulFloat2Addr => "mul-float/2addr",
            Opcode::DivFloat2Addr => "div-float/2addr",
            Opcode::RemFloat2Addr => "rem-float/2addr",
            Opcode::AddDouble2Addr => "add-double/2addr",
            Opcode::SubDouble2Addr => "sub-double/2addr",
            Opcode::MulDouble2Addr => "mul-double/2addr",
            Opcode::DivDouble2Addr => "div-double/2addr",
            Opcode::RemDouble2Addr => "rem-double/2addr",
            Opcode::AddIntLit16 => "add-int/lit16",
            Opcode::RsubInt => "rsub-int",
            Opcode::MulIntLit16 => "mul-int/lit16",
            Opcode::DivIntLit16 => "div-int/lit16",
            Opcode::RemIntLit16 => "rem-int/lit16",
            Opcode::AndIntLit16 => "and-int/lit16",
            Opcode::OrIntLit16 => "or-int/lit16",
            Opcode::XorIntLit16 => "xor-int/lit16",
            Opcode::AddIntLit8 => "add-int/lit8",
            Opcode::RsubIntLit8 => "rsub-int/lit8",
            Opcode::MulIntLit8 => "mul-int/lit8",
            Opcode::DivIntLit8 => "div-int/lit8",
            Opcode::RemIntLit8 => "rem-int/lit8",
            Opcode::AndIntLit8 => "and-int/lit8",
            Opcode::OrIntLit8 => "or-int/lit8",
            Opcode::XorIntLit8 => "xor-int/lit8",
            Opcode::ShlIntLit8 => "shl-int/lit8",
            Opcode::ShrIntLit8 => "shr-int/lit8",
            Opcode::UshrIntLit8 => "ushr-int/lit8",
            Opcode::IgetQuick => "iget-quick",
            Opcode::IgetWideQuick => "iget-wide-quick",
            Opcode::IgetObjectQuick => "iget-object-quick",
            Opcode::IputQuick => "iput-quick",
            Opcode::IputWideQuick => "iput-wide-quick",
            Opcode::IputObjectQuick => "iput-object-quick",
            Opcode::InvokeVirtualQuick => "invoke-virtual-quick",
            Opcode::InvokeVirtualRangeQuick => "invoke-virtual/range-quick",
        }
    }
}
