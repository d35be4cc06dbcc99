use memtrack_core::Reading;

/// Format an integer with `,` thousands separators (e.g. `"1,048,576"`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// The label shown above the progress bar:
/// `Used: 1,234 KB / Total: 5,678 KB (21.73%)`.
pub fn format_label(reading: &Reading) -> String {
    format!(
        "Used: {} KB / Total: {} KB ({:.2}%)",
        group_thousands(reading.used),
        group_thousands(reading.total),
        reading.percent,
    )
}
