use crate::opcode::InstructionFormat;
use crate::reader::BytecodeCursor;

/// Renders the instruction at `pc` in assembler-like form, for
/// execution tracing and diagnostics.
pub fn display_instruction(insns: &[u16], pc: u32) -> String {
    let cursor = BytecodeCursor::new(insns, pc);

    let opcode = match cursor.opcode() {
        Ok(opcode) => opcode,
        Err(byte) => return format!("<reserved 0x{:02x}>", byte),
    };

    let name = opcode.name();

    match opcode.format() {
        InstructionFormat::F10x => name.to_string(),
        InstructionFormat::F12x => format!("{} v{}, v{}", name, cursor.a_12x(), cursor.b_12x()),
        InstructionFormat::F11n => format!("{} v{}, #{}", name, cursor.a_11n(), cursor.b_11n()),
        InstructionFormat::F11x => format!("{} v{}", name, cursor.a_11x()),
        InstructionFormat::F10t => format!("{} {:+}", name, cursor.a_10t()),
        InstructionFormat::F20t => format!("{} {:+}", name, cursor.a_20t()),
        InstructionFormat::F30t => format!("{} {:+}", name, cursor.a_30t()),
        InstructionFormat::F22x => format!("{} v{}, v{}", name, cursor.a_22x(), cursor.b_22x()),
        InstructionFormat::F32x => format!("{} v{}, v{}", name, cursor.a_32x(), cursor.b_32x()),
        InstructionFormat::F21t => format!("{} v{}, {:+}", name, cursor.a_21t(), cursor.b_21t()),
        InstructionFormat::F21s => format!("{} v{}, #{}", name, cursor.a_21s(), cursor.b_21s()),
        InstructionFormat::F21h => {
            format!("{} v{}, #0x{:x}0000", name, cursor.a_21h(), cursor.b_21h())
        }
        InstructionFormat::F21c => format!("{} v{}, @{}", name, cursor.a_21c(), cursor.b_21c()),
        InstructionFormat::F23x => format!(
            "{} v{}, v{}, v{}",
            name,
            cursor.a_23x(),
            cursor.b_23x(),
            cursor.c_23x()
        ),
        InstructionFormat::F22b => format!(
            "{} v{}, v{}, #{}",
            name,
            cursor.a_22b(),
            cursor.b_22b(),
            cursor.c_22b()
        ),
        InstructionFormat::F22t => format!(
            "{} v{}, v{}, {:+}",
            name,
            cursor.a_22t(),
            cursor.b_22t(),
            cursor.c_22t()
        ),
        InstructionFormat::F22s => format!(
            "{} v{}, v{}, #{}",
            name,
            cursor.a_22s(),
            cursor.b_22s(),
            cursor.c_22s()
        ),
        InstructionFormat::F22c => format!(
            "{} v{}, v{}, @{}",
            name,
            cursor.a_22c(),
            cursor.b_22c(),
            cursor.c_22c()
        ),
        InstructionFormat::F31i => format!("{} v{}, #{}", name, cursor.a_31i(), cursor.b_31i()),
        InstructionFormat::F31t => format!("{} v{}, {:+}", name, cursor.a_31t(), cursor.b_31t()),
        InstructionFormat::F31c => format!("{} v{}, @{}", name, cursor.a_31c(), cursor.b_31c()),
        InstructionFormat::F35c => {
            let count = cursor.a_35c() as usize;
            let args = cursor.args_35c();
            let regs: Vec<String> = args[..count].iter().map(|r| format!("v{}", r)).collect();
            format!("{} {{{}}}, @{}", name, regs.join(", "), cursor.b_35c())
        }
        InstructionFormat::F3rc => {
            let count = cursor.a_3rc();
            let first = cursor.c_3rc();
            if count == 0 {
                format!("{} {{}}, @{}", name, cursor.b_3rc())
            } else {
                format!(
                    "{} {{v{} .. v{}}}, @{}",
                    name,
                    first,
                    first + count - 1,
                    cursor.b_3rc()
                )
            }
        }
        InstructionFormat::F51l => format!("{} v{}, #{}", name, cursor.a_51l(), cursor.b_51l()),
    }
}
