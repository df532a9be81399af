//! Flag declarations for the instance selector.
//!
//! Filters describe the instance types a caller is looking for. Suite flags
//! tune aggregate filters, and global flags configure the tool itself.

use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::Command;
use regex::Regex;
use typed_flags::{ByteQuantity, Flag, FlagRegistry, FlagResult, RangeFlags, ResolvedFlags};

use crate::error::Result;
use crate::selection::{Filters, Selection, Settings};

/// Prefix of the environment variables read for every flag.
pub const ENV_PREFIX: &str = "EC2_INSTANCE_SELECTOR_";

/// Values accepted by `--cpu-architecture`.
pub const CPU_ARCHITECTURES: [&str; 4] = ["x86_64", "amd64", "i386", "arm64"];

/// Values accepted by `--usage-class`.
pub const USAGE_CLASSES: [&str; 2] = ["spot", "on-demand"];

/// Values accepted by `--output`.
pub const OUTPUT_FORMATS: [&str; 4] = ["simple", "table", "table-wide", "one-line"];

/// Handles for every flag the selector declares.
#[derive(Debug)]
struct SelectorFlags {
    vcpus: RangeFlags<i64>,
    memory: RangeFlags<ByteQuantity>,
    gpus: RangeFlags<i32>,
    gpu_memory_total: RangeFlags<ByteQuantity>,
    network_performance: RangeFlags<i64>,
    price_per_hour: RangeFlags<f64>,
    vcpus_to_memory_ratio: Flag<f64>,
    cpu_architecture: Flag<String>,
    usage_class: Flag<String>,
    allow_list: Flag<Regex>,
    deny_list: Flag<Regex>,
    hibernation_support: Flag<bool>,
    availability_zones: Flag<Vec<String>>,
    base_instance_type: Flag<String>,
    flexible: Flag<bool>,
    service: Flag<String>,
    output: Flag<String>,
    max_results: Flag<i64>,
    cache_dir: Flag<Utf8PathBuf>,
    verbose: Flag<bool>,
    region: Flag<String>,
    profile: Flag<String>,
}

impl SelectorFlags {
    fn register(registry: &mut FlagRegistry) -> FlagResult<Self> {
        Ok(Self {
            vcpus: registry
                .int_range("vcpus")
                .short('c')
                .help("Number of vcpus available to the instance type.")
                .register()?,
            memory: registry
                .byte_quantity_range("memory")
                .short('m')
                .help("Amount of memory available (Example: 4 GiB)")
                .register()?,
            gpus: registry
                .int32_range("gpus")
                .short('g')
                .help("Total number of GPUs (Example: 4)")
                .register()?,
            gpu_memory_total: registry
                .byte_quantity_range("gpu-memory-total")
                .help("Number of GPUs' total memory (Example: 4 GiB)")
                .register()?,
            network_performance: registry
                .int_range("network-performance")
                .help("Bandwidth in Gib/s of network performance (Example: 100)")
                .register()?,
            price_per_hour: registry
                .float_range("price-per-hour")
                .help("Price/hour in USD (Example: 0.09)")
                .register()?,
            vcpus_to_memory_ratio: registry
                .ratio("vcpus-to-memory-ratio")
                .help("The ratio of vcpus to GiBs of memory. (Example: 1:2)")
                .register()?,
            cpu_architecture: registry
                .string_options("cpu-architecture", CPU_ARCHITECTURES)
                .short('a')
                .help("CPU architecture [x86_64/amd64, i386, or arm64]")
                .register()?,
            usage_class: registry
                .string_options("usage-class", USAGE_CLASSES)
                .short('u')
                .help("Usage class: [spot or on-demand]")
                .register()?,
            allow_list: registry
                .regex("allow-list")
                .help("List of allowed instance types to select from w/ regex syntax (Example: m[3-5]\\.*)")
                .register()?,
            deny_list: registry
                .regex("deny-list")
                .help("List of instance types which should be excluded w/ regex syntax (Example: m[1-2]\\.*)")
                .register()?,
            hibernation_support: registry
                .bool("hibernation-support")
                .help("Hibernation supported")
                .register()?,
            availability_zones: registry
                .string_list("availability-zones")
                .short('z')
                .help("Availability zones or zone ids to check EC2 capacity offered in specific AZs")
                .register()?,
            base_instance_type: registry
                .string("base-instance-type")
                .help("Instance type used to retrieve similarly spec'd instance types")
                .register()?,
            flexible: registry
                .bool("flexible")
                .suite()
                .help("Retrieves a group of instance types spanning multiple generations based on opinionated defaults and user overridden resource filters")
                .register()?,
            service: registry
                .string("service")
                .suite()
                .help("Filter instance types based on service support (Example: emr-5.20.0)")
                .register()?,
            output: registry
                .string_options("output", OUTPUT_FORMATS)
                .short('o')
                .config()
                .help("Specify the output format (simple, table, table-wide, one-line)")
                .default_value("simple".to_owned())
                .register()?,
            max_results: registry
                .int("max-results")
                .config()
                .help("The maximum number of instance types that match your criteria to return")
                .default_value(20)
                .register()?,
            cache_dir: registry
                .path("cache-dir")
                .config()
                .help("Directory to save the pricing and instance type caches")
                .default_value(Utf8PathBuf::from("~/.ec2-instance-selector/"))
                .register()?,
            verbose: registry
                .bool("verbose")
                .short('v')
                .config()
                .help("Verbose - will print out full instance specs")
                .register()?,
            region: registry
                .string("region")
                .short('r')
                .config()
                .help("AWS Region to use for API requests")
                .register()?,
            profile: registry
                .string("profile")
                .config()
                .help("AWS CLI profile to use for credentials and config")
                .register()?,
        })
    }

    fn filters(&self, resolved: &ResolvedFlags) -> Filters {
        Filters {
            vcpus: resolved.range(&self.vcpus),
            memory: resolved.range(&self.memory),
            gpus: resolved.range(&self.gpus),
            gpu_memory_total: resolved.range(&self.gpu_memory_total),
            network_performance: resolved.range(&self.network_performance),
            price_per_hour: resolved.range(&self.price_per_hour),
            vcpus_to_memory_ratio: resolved.get(&self.vcpus_to_memory_ratio).copied(),
            cpu_architecture: resolved
                .get(&self.cpu_architecture)
                .map(|arch| arch.to_ascii_lowercase()),
            usage_class: resolved
                .get(&self.usage_class)
                .map(|class| class.to_ascii_lowercase()),
            allow_list: resolved.get(&self.allow_list).cloned(),
            deny_list: resolved.get(&self.deny_list).cloned(),
            hibernation_support: resolved.get(&self.hibernation_support).copied(),
            availability_zones: resolved.get(&self.availability_zones).cloned(),
            base_instance_type: resolved.get(&self.base_instance_type).cloned(),
            flexible: resolved.get(&self.flexible).copied().unwrap_or(false),
            service: resolved.get(&self.service).cloned(),
        }
    }

    fn settings(&self, resolved: &ResolvedFlags) -> Settings {
        Settings {
            output: resolved
                .get(&self.output)
                .map_or_else(|| "simple".to_owned(), |format| format.to_ascii_lowercase()),
            max_results: resolved.get(&self.max_results).copied().unwrap_or(20),
            cache_dir: resolved.get(&self.cache_dir).cloned(),
            verbose: resolved.get(&self.verbose).copied().unwrap_or(false),
            region: resolved.get(&self.region).cloned(),
            profile: resolved.get(&self.profile).cloned(),
        }
    }
}

/// The selector's command line.
#[derive(Debug)]
pub struct SelectorCli {
    registry: FlagRegistry,
    flags: SelectorFlags,
}

impl SelectorCli {
    /// Declares every selector flag.
    ///
    /// # Errors
    ///
    /// Returns a [`typed_flags::FlagError`] when a declaration is refused.
    pub fn new() -> FlagResult<Self> {
        let mut registry = FlagRegistry::new("ec2-instance-selector")
            .about("Recommends instance types based on resource criteria like vcpus and memory")
            .version(env!("CARGO_PKG_VERSION"))
            .env_prefix(ENV_PREFIX);
        let flags = SelectorFlags::register(&mut registry)?;
        Ok(Self { registry, flags })
    }

    /// The clap command behind the selector, for help rendering.
    #[must_use]
    pub fn command(&self) -> Command {
        self.registry.command()
    }

    /// Parses `args`, whose first item is the binary name.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::Flags`](crate::error::SelectorError::Flags)
    /// when any flag fails to parse, process, validate, or reconcile.
    pub fn parse_from<I, T>(&self, args: I) -> Result<Selection>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let resolved = self.registry.parse_from(args)?;
        let selection = Selection {
            filters: self.flags.filters(&resolved),
            settings: self.flags.settings(&resolved),
        };
        tracing::debug!(
            active_filters = selection.filters.active(),
            output = %selection.settings.output,
            "selection resolved"
        );
        Ok(selection)
    }
}
