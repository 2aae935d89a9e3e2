/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: char) -> Option<u8> {
    match key.to_ascii_uppercase() {
        'X' => Some(0x0),
        '1' => Some(0x1),
        '2' => Some(0x2),
        '3' => Some(0x3),
        'Q' => Some(0x4),
        'W' => Some(0x5),
        'E' => Some(0x6),
        'A' => Some(0x7),
        'S' => Some(0x8),
        'D' => Some(0x9),
        'Z' => Some(0xA),
        'C' => Some(0xB),
        '4' => Some(0xC),
        'R' => Some(0xD),
        'F' => Some(0xE),
        'V' => Some(0xF),
        _ => None,
    }
}
