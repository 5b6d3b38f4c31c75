const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Lead times offered by the appointment form.
pub const REMINDER_PRESETS: [u32; 7] = [0, 15, 30, 60, 120, 1440, 2880];

/// "1 dia antes", "2 horas antes", "45 minutos antes".
///
/// Picks the largest unit that divides the lead time evenly.
pub fn format_reminder(minutes: u32) -> String {
    let (count, singular, plural) = if minutes % MINUTES_PER_DAY == 0 {
        (minutes / MINUTES_PER_DAY, "dia", "dias")
    } else if minutes % MINUTES_PER_HOUR == 0 {
        (minutes / MINUTES_PER_HOUR, "hora", "horas")
    } else {
        (minutes, "minuto", "minutos")
    };
    let unit = if count == 1 { singular } else { plural };
    format!("{count} {unit} antes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reminder() {
        assert_eq!(format_reminder(1440), "1 dia antes");
        assert_eq!(format_reminder(2880), "2 dias antes");
        assert_eq!(format_reminder(60), "1 hora antes");
        assert_eq!(format_reminder(120), "2 horas antes");
        assert_eq!(format_reminder(90), "90 minutos antes");
        assert_eq!(format_reminder(45), "45 minutos antes");
        assert_eq!(format_reminder(1), "1 minuto antes");
        // zero divides by every unit, so it reads in days
        assert_eq!(format_reminder(0), "0 dias antes");
    }
}
