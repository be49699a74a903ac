//! Gallery page - renders the listing as a single HTML document.

use crate::gallery::GalleryEntry;

/// Escape HTML special characters to prevent XSS attacks.
fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Percent-encode each segment of a path, keeping the `/` separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn render_card(entry: &GalleryEntry) -> String {
    let name = html_escape(&entry.key);
    let preview = html_escape(&encode_path(&entry.transcoded_url));

    let original = match &entry.original_url {
        Some(url) => format!(
            r#"<a class="original" href="{}" target="_blank" rel="noopener">Download original</a>"#,
            html_escape(url)
        ),
        None => r#"<span class="unavailable">Original link unavailable</span>"#.to_string(),
    };

    format!(
        r#"        <figure class="card">
            <a href="{preview}" target="_blank" rel="noopener"><img src="{preview}" alt="{name}" loading="lazy"></a>
            <figcaption>
                <span class="name">{name}</span>
                {original}
            </figcaption>
        </figure>
"#
    )
}

/// Generate the gallery HTML page.
///
/// # Arguments
///
/// * `title` - Page heading, usually the bucket name
/// * `entries` - Entries in the order they should be shown
pub fn generate_gallery_html(title: &str, entries: &[GalleryEntry]) -> String {
    let escaped_title = html_escape(title);
    let count = entries.len();

    let body = if entries.is_empty() {
        r#"        <p class="empty">No images found.</p>
"#
        .to_string()
    } else {
        entries.iter().map(render_card).collect::<String>()
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Gallery - {escaped_title}</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}
        body {{
            background: #0f0f0f;
            color: #fff;
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            padding: 24px;
        }}
        header {{
            margin-bottom: 24px;
        }}
        header h1 {{
            font-size: 20px;
            font-weight: 600;
            word-break: break-all;
        }}
        header .meta {{
            color: rgba(255, 255, 255, 0.6);
            font-size: 13px;
        }}
        .grid {{
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
            gap: 16px;
        }}
        .card {{
            background: rgba(255, 255, 255, 0.05);
            border: 1px solid rgba(255, 255, 255, 0.1);
            border-radius: 8px;
            overflow: hidden;
        }}
        .card img {{
            display: block;
            width: 100%;
            height: 200px;
            object-fit: contain;
            background: #1a1a1a;
        }}
        .card figcaption {{
            padding: 10px 12px;
            font-size: 12px;
            line-height: 1.6;
        }}
        .card .name {{
            display: block;
            word-break: break-all;
            color: rgba(255, 255, 255, 0.9);
        }}
        .card .original {{
            color: #818cf8;
        }}
        .card .unavailable {{
            color: rgba(255, 255, 255, 0.4);
        }}
        .empty {{
            color: rgba(255, 255, 255, 0.5);
        }}
    </style>
</head>
<body>
    <header>
        <h1>{escaped_title}</h1>
        <div class="meta">{count} image(s)</div>
    </header>
    <main class="grid">
{body}    </main>
</body>
</html>
"##
    )
}
