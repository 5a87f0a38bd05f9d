//! Builds small, valid PDFs in memory for the integration tests.

#![allow(dead_code)]

/// One page: its media box size in points and an optional solid fill.
#[derive(Copy, Clone, Debug)]
pub struct TestPage {
    pub width: u32,
    pub height: u32,
    pub fill: Option<[f32; 3]>,
}

impl TestPage {
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fill: None,
        }
    }

    pub fn filled(width: u32, height: u32, rgb: [f32; 3]) -> Self {
        Self {
            width,
            height,
            fill: Some(rgb),
        }
    }
}

/// Serialize `pages` into a PDF with a correct cross-reference table.
pub fn build_pdf(pages: &[TestPage]) -> Vec<u8> {
    // Object 1 is the catalog, 2 the page tree, then a page and its content stream per page.
    let page_id = |i: usize| 3 + 2 * i;
    let content_id = |i: usize| 4 + 2 * i;

    let mut objects: Vec<Vec<u8>> = Vec::new();
    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", page_id(i)))
        .collect::<Vec<_>>()
        .join(" ");
    objects.push(format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).into_bytes());

    for (i, page) in pages.iter().enumerate() {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << >> /Contents {} 0 R >>",
                page.width,
                page.height,
                content_id(i)
            )
            .into_bytes(),
        );

        let content = match page.fill {
            Some([r, g, b]) => format!(
                "{} {} {} rg\n0 0 {} {} re\nf\n",
                r, g, b, page.width, page.height
            ),
            None => String::new(),
        };
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content.as_bytes());
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}

pub const RED: [f32; 3] = [1.0, 0.0, 0.0];
pub const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
pub const BLUE: [f32; 3] = [0.0, 0.0, 1.0];

/// `count` pages of the same size, all filled with `rgb`.
pub fn uniform_pdf(count: usize, width: u32, height: u32, rgb: [f32; 3]) -> Vec<u8> {
    let pages: Vec<_> = (0..count)
        .map(|_| TestPage::filled(width, height, rgb))
        .collect();
    build_pdf(&pages)
}
