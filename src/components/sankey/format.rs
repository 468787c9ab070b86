//! Number formatting for hover text.

/// Formats an amount rounded to whole units with `,` thousands separators.
pub fn format_amount(value: f64) -> String {
	let rounded = value.round();
	let negative = rounded < 0.0;
	let digits = format!("{:.0}", rounded.abs());

	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
	if negative {
		grouped.push('-');
	}
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(ch);
	}
	grouped
}
