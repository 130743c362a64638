fn main() -> anyhow::Result<std::process::ExitCode> {
    directory_cli::main_entry()
}
