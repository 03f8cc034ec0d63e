//! Reusable test content

/// Minimal document with a preamble and a body
pub const SIMPLE_DOC: &str = "\\documentclass{article}
\\usepackage{amsmath}
\\begin{document}
Hello
\\end{document}
";

/// Fake TeX engine.
///
/// Appends its arguments to `$FAKE_TEX_CALLS`, checks that the input file
/// exists in the working directory, and writes what a real engine would:
/// `.log`, `.fmt` for `-ini`, `.pdf` and `.synctex` for final passes.
/// Fails every pass when `$FAKE_TEX_FAIL` is set.
pub const FAKE_TEX: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "pdfTeX 3.141592653-2.6-1.40.25 (TeX Live 2023)"
  echo "kpathsea version 6.3.5"
  exit 0
fi
[ -n "$FAKE_TEX_CALLS" ] && echo "$*" >> "$FAKE_TEX_CALLS"
job=texput; out=.; aux=; ini=0; draft=0; synctex=0; last=
for a in "$@"; do
  case "$a" in
    -jobname=*) job="${a#-jobname=}" ;;
    -output-directory=*) out="${a#-output-directory=}" ;;
    -aux-directory=*) out="${a#-aux-directory=}"; aux=1 ;;
    -ini) ini=1 ;;
    -draftmode) draft=1 ;;
    --synctex=-1) synctex=1 ;;
  esac
  last="$a"
done
input="${last#* }"
if [ -n "$FAKE_TEX_FAIL" ] || [ ! -f "$input" ]; then
  printf 'This is fake TeX\n! Undefined control sequence.\nl.3 \\foo\n' > "$out/$job.log"
  exit 1
fi
echo "This is fake TeX" > "$out/$job.log"
if [ $ini = 1 ]; then
  echo fmt > "$out/$job.fmt"
  exit 0
fi
[ $draft = 1 ] && exit 0
pdfdir="$out"
[ -n "$aux" ] && pdfdir=.
echo "%PDF-1.5" > "$pdfdir/$job.pdf"
if [ $synctex = 1 ]; then
  printf 'SyncTeX Version:1\nInput:1:%s/./%s\n' "$(pwd)" "$input" > "$pdfdir/$job.synctex"
fi
exit 0
"#;
