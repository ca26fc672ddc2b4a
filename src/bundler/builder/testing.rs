//! In-process stand-ins for the external packaging tools.

use crate::bundler::utils::process::{CommandOutput, CommandRunner, ToolCommand};
use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

type Handler = Box<dyn Fn(&ToolCommand) -> io::Result<CommandOutput>>;

/// Records every command and answers with a configurable handler.
pub struct FakeRunner {
    tools: HashSet<String>,
    calls: RefCell<Vec<ToolCommand>>,
    handler: Handler,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            tools: HashSet::new(),
            calls: RefCell::new(Vec::new()),
            handler: Box::new(|_| Ok(CommandOutput::success(""))),
        }
    }

    pub fn with_tools(mut self, names: &[&str]) -> Self {
        self.tools.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn with_handler(
        mut self,
        handler: impl Fn(&ToolCommand) -> io::Result<CommandOutput> + 'static,
    ) -> Self {
        self.handler = Box::new(handler);
        self
    }

    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.borrow().clone()
    }

    /// `program_name` plus the first two arguments of every call, e.g.
    /// `"python3 -m pip"`.
    pub fn summary(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| {
                let mut parts = vec![c.program_name()];
                parts.extend(c.args.iter().take(2).cloned());
                parts.join(" ")
            })
            .collect()
    }

    pub fn count(&self, program: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program_name() == program)
            .count()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, command: &ToolCommand) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(command.clone());
        (self.handler)(command)
    }

    fn find_tool(&self, name: &str) -> Option<PathBuf> {
        if !self.tools.contains(name) {
            return None;
        }
        let path = Path::new(name);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(Path::new("/usr/bin").join(name))
        }
    }
}

/// Scripted behaviour of a host with Python and the macOS tools.
#[derive(Debug, Clone)]
pub struct FakeHost {
    pub python_version: String,
    pub pip_exit: i32,
    pub pyinstaller_exit: i32,
    pub produce_bundle: bool,
    pub produce_info_plist: bool,
    pub sips_exit: i32,
    pub iconutil_exit: i32,
    pub codesign_exit: i32,
    pub tools: Vec<&'static str>,
}

pub const PLIST_BUDDY: &str = "/usr/libexec/PlistBuddy";

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            python_version: "Python 3.12.1".into(),
            pip_exit: 0,
            pyinstaller_exit: 0,
            produce_bundle: true,
            produce_info_plist: true,
            sips_exit: 0,
            iconutil_exit: 0,
            codesign_exit: 0,
            tools: vec!["sips", "iconutil", "codesign", PLIST_BUDDY],
        }
    }
}

impl FakeHost {
    /// A host without any of the macOS tools.
    pub fn linux() -> Self {
        Self {
            tools: Vec::new(),
            ..Default::default()
        }
    }

    pub fn runner(self) -> FakeRunner {
        let tools = self.tools.clone();
        FakeRunner::new()
            .with_tools(&tools)
            .with_handler(move |cmd| self.respond(cmd))
    }

    fn respond(&self, cmd: &ToolCommand) -> io::Result<CommandOutput> {
        let args: Vec<&str> = cmd.args.iter().map(String::as_str).collect();
        match (cmd.program_name().as_str(), args.as_slice()) {
            (_, ["--version"]) => Ok(CommandOutput::success(format!("{}\n", self.python_version))),
            (_, ["-m", "pip", ..]) => Ok(exit(self.pip_exit, "ERROR: No matching distribution")),
            (_, ["-m", "PyInstaller", ..]) => self.pyinstaller(cmd),
            ("sips", ["-z", h, w, _src, "--out", dst]) => {
                if self.sips_exit == 0 {
                    std::fs::write(dst, format!("{h}x{w}"))?;
                }
                Ok(exit(self.sips_exit, "sips: unable to render source"))
            }
            ("iconutil", ["-c", "icns", iconset, "-o", out]) => {
                if self.iconutil_exit == 0 {
                    let count = std::fs::read_dir(iconset)?.count();
                    std::fs::write(out, format!("icns with {count} images"))?;
                }
                Ok(exit(self.iconutil_exit, "iconutil: Failed to generate ICNS."))
            }
            ("PlistBuddy", ["-c", command, plist]) => emulate_plist_buddy(command, Path::new(plist)),
            ("codesign", _) => Ok(exit(
                self.codesign_exit,
                "resource fork, Finder information, or similar detritus not allowed",
            )),
            _ => Ok(CommandOutput::success("")),
        }
    }

    fn pyinstaller(&self, cmd: &ToolCommand) -> io::Result<CommandOutput> {
        if self.pyinstaller_exit != 0 {
            return Ok(exit(self.pyinstaller_exit, "PyInstaller: analysis failed"));
        }
        let dir = cmd.current_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(dir.join("build"))?;
        std::fs::create_dir_all(dir.join("dist"))?;
        if self.produce_bundle {
            let name = arg_after(cmd, "--name").unwrap_or("App");
            let contents = dir.join("dist").join(format!("{name}.app")).join("Contents");
            std::fs::create_dir_all(contents.join("MacOS"))?;
            std::fs::write(contents.join("MacOS").join(name), "frozen executable")?;
            if self.produce_info_plist {
                let mut dict = plist::Dictionary::new();
                dict.insert("CFBundleName".into(), name.into());
                dict.insert("CFBundleExecutable".into(), name.into());
                plist::Value::Dictionary(dict)
                    .to_file_xml(contents.join("Info.plist"))
                    .map_err(io::Error::other)?;
            }
        }
        Ok(CommandOutput::success("Building BUNDLE completed successfully."))
    }
}

fn exit(code: i32, stderr: &str) -> CommandOutput {
    if code == 0 {
        CommandOutput::success("")
    } else {
        CommandOutput::failure(code, stderr)
    }
}

pub fn arg_after<'a>(cmd: &'a ToolCommand, flag: &str) -> Option<&'a str> {
    cmd.args
        .iter()
        .position(|a| a == flag)
        .and_then(|i| cmd.args.get(i + 1))
        .map(String::as_str)
}

/// Implements the `Set :Key value` / `Add :Key string value` subset of
/// PlistBuddy with its existence rules.
fn emulate_plist_buddy(command: &str, path: &Path) -> io::Result<CommandOutput> {
    let mut value = plist::Value::from_file(path).map_err(io::Error::other)?;
    let dict = value
        .as_dictionary_mut()
        .ok_or_else(|| io::Error::other("root is not a dictionary"))?;

    let (verb, rest) = command.split_once(' ').unwrap_or((command, ""));
    let (key, rest) = rest.split_once(' ').unwrap_or((rest, ""));
    let key = key.trim_start_matches(':').to_string();

    let result = match verb {
        "Set" if dict.contains_key(&key) => {
            dict.insert(key, unquote(rest).into());
            CommandOutput::success("")
        }
        "Set" => CommandOutput::failure(1, format!("Set: Entry, \":{key}\", Does Not Exist")),
        "Add" if dict.contains_key(&key) => {
            CommandOutput::failure(1, format!("Add: \":{key}\" Entry Already Exists"))
        }
        "Add" => match rest.split_once(' ') {
            Some(("string", v)) => {
                dict.insert(key, unquote(v).into());
                CommandOutput::success("")
            }
            _ => CommandOutput::failure(1, "Unrecognized Type"),
        },
        _ => CommandOutput::failure(1, "Unrecognized Command"),
    };

    if result.is_success() {
        value.to_file_xml(path).map_err(io::Error::other)?;
    }
    Ok(result)
}

fn unquote(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .map(|v| v.replace("\\\"", "\""))
        .unwrap_or_else(|| value.to_string())
}
