pub mod registry_loader;
