/// Well-known license names and the URL of their text.
pub const LICENSE_MAP: &[(&str, &str)] = &[
    ("Apache-2.0", "http://www.apache.org/licenses/LICENSE-2.0.txt"),
    ("BSD-3-Clause", "https://opensource.org/licenses/BSD-3-Clause"),
    ("MIT", "http://www.opensource.org/licenses/mit-license.php"),
    ("GPLv3", "https://www.gnu.org/licenses/gpl-3.0.html"),
    ("LGPLv3", "https://www.gnu.org/licenses/lgpl-3.0.html"),
];

/// URL of a well-known license, matched by exact name.
pub fn license_url(name: &str) -> Option<&'static str> {
    LICENSE_MAP
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, url)| *url)
}
