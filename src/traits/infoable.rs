use anyhow::Result;

pub trait Infoable {
    fn info(&self, f: &mut impl std::io::Write) -> Result<()>;
}

impl Infoable for String {
    fn info(&self, f: &mut impl std::io::Write) -> Result<()> {
        Ok(writeln!(f, "Length\t{}", self.len())?)
    }
}

/// Writes a min/max/mean line for a sequence of counts.
pub(crate) fn write_count_statistics(
    f: &mut impl std::io::Write,
    label: &str,
    counts: impl Iterator<Item = usize>,
) -> Result<()> {
    let mut number = 0usize;
    let mut sum = 0usize;
    let mut min = usize::MAX;
    let mut max = 0usize;
    for count in counts {
        number += 1;
        sum += count;
        min = min.min(count);
        max = max.max(count);
    }

    if number == 0 {
        Ok(writeln!(f, "{}\tn/a", label)?)
    } else {
        Ok(writeln!(
            f,
            "{}\tmin {}\tmax {}\tmean {:.2}",
            label,
            min,
            max,
            sum as f64 / number as f64
        )?)
    }
}
