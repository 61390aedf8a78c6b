// src/system/bootstrap.rs

//! Shell wrappers that turn `envon` into a command that activates directly.
//!
//! Every wrapper follows the same contract:
//! - `help`, or a first argument starting with `-` (except the literal `--`),
//!   goes straight to the real executable and its output is left untouched;
//! - anything else is forwarded as `envon --emit <shell> ...`, and the captured
//!   stdout is evaluated only if the executable succeeded.
//!
//! A leading `--` is forwarded as is, so `envon -- -name` reaches the parser
//! with the separator intact.

use crate::models::Shell;

const POSIX_BOOTSTRAP: &str = r#"envon() {
  if [ "$#" -gt 0 ]; then
    case "$1" in
      --) ;;
      help|-h|--help) command envon "$@"; return $? ;;
      -*) command envon "$@"; return $? ;;
    esac
  fi
  local cmd ec
  cmd="$(command envon --emit bash "$@")"; ec=$?
  if [ $ec -ne 0 ]; then
    [ -n "$cmd" ] && printf '%s\n' "$cmd" >&2
    return $ec
  fi
  eval "$cmd"
}
"#;

const FISH_BOOTSTRAP: &str = r#"function envon
    if test (count $argv) -gt 0; and test "$argv[1]" != "--"
        if string match -qr -- '^(help$|-)' $argv[1]
            command envon $argv
            return $status
        end
    end
    set -l cmd (command envon --emit fish $argv)
    set -l ec $status
    if test $ec -ne 0
        test -n "$cmd"; and printf '%s\n' $cmd >&2
        return $ec
    end
    eval $cmd
end
"#;

// `overlay use` needs a parse-time path, so the captured line is submitted
// back to the REPL instead of being called from inside the function.
const NUSHELL_BOOTSTRAP: &str = r#"def --env envon [...args: string] {
  let first = ($args | get 0? | default "")
  if $first == "help" or (($first | str starts-with "-") and $first != "--") {
    ^envon ...$args
    return
  }
  let result = (^envon --emit nushell ...$args | complete)
  if $result.exit_code != 0 {
    let message = ([$result.stdout $result.stderr] | str join "" | str trim)
    if ($message | is-not-empty) { print --stderr $message }
    error make --unspanned { msg: $"envon exited with status ($result.exit_code)" }
  }
  commandline edit --replace --accept ($result.stdout | str trim)
}
"#;

const POWERSHELL_BOOTSTRAP: &str = r#"function envon {
  $envonExe = Get-Command envon -CommandType Application -ErrorAction SilentlyContinue | Select-Object -First 1
  if (-not $envonExe) { Write-Error 'envon executable not found on PATH'; return }
  $envonArgs = @($args)
  $first = if ($envonArgs.Count -gt 0) { "$($envonArgs[0])" } else { '' }
  if ($first -ne '--' -and ($first -eq 'help' -or $first.StartsWith('-'))) {
    & $envonExe.Source @envonArgs
    return
  }
  $cmd = & $envonExe.Source --emit powershell @envonArgs
  if ($LASTEXITCODE -ne 0) {
    if ($cmd) { Write-Error ($cmd -join "`n") }
    return
  }
  Invoke-Expression ($cmd -join "`n")
}
"#;

// csh aliases are one line and cannot return a status; `\envon` skips alias lookup.
const CSH_BOOTSTRAP: &str = r#"alias envon 'set _envon_argv=(\!* ""); set _envon_first="$_envon_argv[1]"; set _envon_cmd=""; if ("$_envon_first" == "help" || ("$_envon_first" =~ -* && "$_envon_first" != "--")) set _envon_pass; if ($?_envon_pass) \envon \!*; if (! $?_envon_pass) set _envon_cmd="`\envon --emit csh \!*`"; if ("$_envon_cmd" != "") eval "$_envon_cmd"; unset _envon_argv _envon_first _envon_pass _envon_cmd'
"#;

const CMD_BOOTSTRAP: &str = r#"@echo off
rem envon wrapper for cmd.exe: save as envon.bat in a PATH directory listed before envon.exe
if "%~1"=="" goto envon_activate
if /i "%~1"=="help" goto envon_passthrough
set "ENVON_FIRST=%~1"
if not "%ENVON_FIRST%"=="--" if "%ENVON_FIRST:~0,1%"=="-" (
  set "ENVON_FIRST="
  goto envon_passthrough
)
set "ENVON_FIRST="
:envon_activate
set "ENVON_CMD="
for /f "usebackq delims=" %%i in (`envon.exe --emit cmd %*`) do set "ENVON_CMD=%%i"
if not defined ENVON_CMD exit /b 1
%ENVON_CMD%
set "ENVON_CMD="
exit /b 0
:envon_passthrough
envon.exe %*
exit /b %ERRORLEVEL%
"#;

/// Returns the wrapper definition for `shell`.
pub fn bootstrap(shell: Shell) -> &'static str {
    match shell {
        Shell::Posix => POSIX_BOOTSTRAP,
        Shell::Fish => FISH_BOOTSTRAP,
        Shell::Nushell => NUSHELL_BOOTSTRAP,
        Shell::PowerShell => POWERSHELL_BOOTSTRAP,
        Shell::Csh => CSH_BOOTSTRAP,
        Shell::Cmd => CMD_BOOTSTRAP,
    }
}
