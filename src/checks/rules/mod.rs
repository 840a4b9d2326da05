//! Built-in upgrade checks.

pub mod host_maintenance_mode;
pub mod hosts_repository_version;
pub mod install_packages;

pub use host_maintenance_mode::HostMaintenanceModeCheck;
pub use hosts_repository_version::HostsRepositoryVersionCheck;
pub use install_packages::InstallPackagesCheck;
