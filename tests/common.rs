//! Common utilities for integration tests

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Typical `aplay -l` output with the US-144MKII present as card 2.
pub const APLAY_LISTING: &str = "\
**** List of PLAYBACK Hardware Devices ****
card 0: PCH [HDA Intel PCH], device 0: ALC892 Analog [ALC892 Analog]
  Subdevices: 1/1
  Subdevice #0: subdevice #0
card 2: US144MKII [TASCAM US-144MKII], device 0: US-144MKII PCM [US-144MKII PCM]
  Subdevices: 1/1
  Subdevice #0: subdevice #0
";

/// Drop an executable shell script into `dir` and return its path. Used to
/// stand in for aplay/amixer so the full subprocess path gets exercised.
pub fn write_stub_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, script).expect("failed to write stub tool");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("failed to mark stub tool executable");
    path
}

/// Stub amixer whose cget replies carry the given values field.
pub fn stub_amixer_cget(dir: &Path, values: &str) -> PathBuf {
    let script = format!(
        "#!/bin/sh\n\
         echo \"numid=5,iface=MIXER,name='Stub Control'\"\n\
         echo \"  ; type=INTEGER,access=rw------,values=1\"\n\
         echo \"  : values={}\"\n",
        values
    );
    write_stub_tool(dir, "amixer", &script)
}

/// Stub tool that exits with the given status and prints nothing useful.
pub fn stub_failing_tool(dir: &Path, name: &str, code: i32) -> PathBuf {
    write_stub_tool(dir, name, &format!("#!/bin/sh\nexit {}\n", code))
}

/// Build `<root>/card<N>/device/<attr>` with the given contents, the shape
/// the us144mkii driver exposes under /sys/class/sound.
pub fn write_fake_sysfs_attr(root: &Path, card: u32, attr: &str, contents: &str) {
    let device_dir = root.join(format!("card{}", card)).join("device");
    std::fs::create_dir_all(&device_dir).expect("failed to build fake sysfs tree");
    std::fs::write(device_dir.join(attr), contents).expect("failed to write sysfs attr");
}
