fn main() {
    // Compile Slint UI files with the dark Fluent style
    let config = slint_build::CompilerConfiguration::new().with_style("fluent-dark".into());
    slint_build::compile_with_config("ui/main.slint", config).unwrap();

    // Embed Windows version info
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "Launch on Please");
        res.set("FileDescription", "Launch programs on a chosen monitor");
        res.set("CompanyName", "Toxic Orca Studio");
        res.set("LegalCopyright", "Copyright © 2025 Toxic Orca Studio");
        res.set("OriginalFilename", "launchonplease.exe");
        res.set("FileVersion", env!("CARGO_PKG_VERSION"));
        res.set("ProductVersion", env!("CARGO_PKG_VERSION"));
        res.compile().unwrap();
    }
}
