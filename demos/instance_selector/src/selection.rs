//! Typed view of the resolved selector flags and its textual summary.

use std::cmp::Ordering;
use std::fmt::Display;
use std::io::{self, Write};

use camino::Utf8PathBuf;
use regex::Regex;
use typed_flags::{ByteQuantity, RangeValue};

/// Resource filters requested by the caller.
///
/// Ranges hold inclusive `(min, max)` bounds after reconciliation; a missing
/// bound on the command line shows up as the type's lower or upper limit.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    /// Number of vCPUs.
    pub vcpus: Option<(i64, i64)>,
    /// Instance memory.
    pub memory: Option<(ByteQuantity, ByteQuantity)>,
    /// Number of GPUs.
    pub gpus: Option<(i32, i32)>,
    /// Total GPU memory.
    pub gpu_memory_total: Option<(ByteQuantity, ByteQuantity)>,
    /// Network bandwidth in Gib/s.
    pub network_performance: Option<(i64, i64)>,
    /// Hourly price in USD.
    pub price_per_hour: Option<(f64, f64)>,
    /// GiBs of memory per vCPU.
    pub vcpus_to_memory_ratio: Option<f64>,
    /// Lower-cased CPU architecture.
    pub cpu_architecture: Option<String>,
    /// Lower-cased usage class.
    pub usage_class: Option<String>,
    /// Instance types to select from.
    pub allow_list: Option<Regex>,
    /// Instance types to exclude.
    pub deny_list: Option<Regex>,
    /// Hibernation support.
    pub hibernation_support: Option<bool>,
    /// Availability zones to check capacity in.
    pub availability_zones: Option<Vec<String>>,
    /// Instance type whose shape should be matched.
    pub base_instance_type: Option<String>,
    /// Whether to widen the search across generations.
    pub flexible: bool,
    /// Service the instance types must support.
    pub service: Option<String>,
}

impl Filters {
    /// Number of filters the caller supplied.
    #[must_use]
    pub fn active(&self) -> usize {
        [
            self.vcpus.is_some(),
            self.memory.is_some(),
            self.gpus.is_some(),
            self.gpu_memory_total.is_some(),
            self.network_performance.is_some(),
            self.price_per_hour.is_some(),
            self.vcpus_to_memory_ratio.is_some(),
            self.cpu_architecture.is_some(),
            self.usage_class.is_some(),
            self.allow_list.is_some(),
            self.deny_list.is_some(),
            self.hibernation_support.is_some(),
            self.availability_zones.is_some(),
            self.base_instance_type.is_some(),
            self.flexible,
            self.service.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

/// Global settings that shape how the selector runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Lower-cased output format.
    pub output: String,
    /// Maximum number of instance types to report.
    pub max_results: i64,
    /// Directory for cached pricing data, with `~` expanded.
    pub cache_dir: Option<Utf8PathBuf>,
    /// Whether to print full instance specs.
    pub verbose: bool,
    /// Region used for API requests.
    pub region: Option<String>,
    /// Credentials profile.
    pub profile: Option<String>,
}

/// Everything the caller asked for.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Resource filters.
    pub filters: Filters,
    /// Global settings.
    pub settings: Settings,
}

/// Describes an inclusive range, collapsing open and degenerate ends.
#[must_use]
pub fn describe_range<T: RangeValue + Display>((min, max): (T, T)) -> String {
    let open_below = min.partial_cmp(&T::LOWER) == Some(Ordering::Equal);
    let open_above = max.partial_cmp(&T::UPPER) == Some(Ordering::Equal);
    if min.partial_cmp(&max) == Some(Ordering::Equal) {
        format!("exactly {min}")
    } else if open_above {
        format!("at least {min}")
    } else if open_below {
        format!("at most {max}")
    } else {
        format!("{min} to {max}")
    }
}

fn write_range<W, T>(out: &mut W, name: &str, range: Option<(T, T)>) -> io::Result<()>
where
    W: Write,
    T: RangeValue + Display,
{
    match range {
        Some(bounds) => writeln!(out, "  {name}: {}", describe_range(bounds)),
        None => Ok(()),
    }
}

fn write_value<W: Write>(out: &mut W, name: &str, value: Option<impl Display>) -> io::Result<()> {
    match value {
        Some(shown) => writeln!(out, "  {name}: {shown}"),
        None => Ok(()),
    }
}

/// Writes a human-readable summary of `selection` to `out`.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing to `out` fails.
pub fn write_summary<W: Write>(out: &mut W, selection: &Selection) -> io::Result<()> {
    let Selection { filters, settings } = selection;
    if filters.active() == 0 {
        writeln!(out, "Filters: none")?;
    } else {
        writeln!(out, "Filters:")?;
    }
    write_range(out, "vcpus", filters.vcpus)?;
    write_range(out, "memory", filters.memory)?;
    write_range(out, "gpus", filters.gpus)?;
    write_range(out, "gpu-memory-total", filters.gpu_memory_total)?;
    write_range(out, "network-performance", filters.network_performance)?;
    write_range(out, "price-per-hour", filters.price_per_hour)?;
    write_value(
        out,
        "vcpus-to-memory-ratio",
        filters
            .vcpus_to_memory_ratio
            .map(|factor| format!("{factor} GiB per vCPU")),
    )?;
    write_value(out, "cpu-architecture", filters.cpu_architecture.as_deref())?;
    write_value(out, "usage-class", filters.usage_class.as_deref())?;
    write_value(out, "allow-list", filters.allow_list.as_ref().map(Regex::as_str))?;
    write_value(out, "deny-list", filters.deny_list.as_ref().map(Regex::as_str))?;
    write_value(out, "hibernation-support", filters.hibernation_support)?;
    write_value(
        out,
        "availability-zones",
        filters.availability_zones.as_ref().map(|zones| zones.join(", ")),
    )?;
    write_value(out, "base-instance-type", filters.base_instance_type.as_deref())?;
    if filters.flexible {
        writeln!(out, "  flexible: true")?;
    }
    write_value(out, "service", filters.service.as_deref())?;

    writeln!(out, "Settings:")?;
    writeln!(out, "  output: {}", settings.output)?;
    writeln!(out, "  max-results: {}", settings.max_results)?;
    write_value(out, "cache-dir", settings.cache_dir.as_ref())?;
    write_value(out, "region", settings.region.as_deref())?;
    write_value(out, "profile", settings.profile.as_deref())?;
    if settings.verbose {
        writeln!(out, "  verbose: true")?;
    }
    Ok(())
}

/// Prints the summary to standard output.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing to standard output fails.
pub fn print_summary(selection: &Selection) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_summary(&mut stdout, selection)
}
