use assert_cmd::Command;

pub fn caltrack_cmd() -> Command {
    let mut cmd = Command::cargo_bin("caltrack").unwrap();
    cmd.env_remove("CALTRACK_ROOT");
    cmd.env_remove("CALTRACK_LOG");
    cmd
}
