//! 浏览器 File 适配
//!
//! 把 `<input type="file">` 或拖放得到的 `web_sys::File` 包装成核心层的 `ImageSource`。

use js_sys::Uint8Array;
use plantaid::image::ImageFile;
use plantaid::upload::{ImageSource, ReadError};
use wasm_bindgen_futures::JsFuture;

pub struct BrowserFile(web_sys::File);

impl BrowserFile {
    /// 取 FileList 中的第一个文件（多选时忽略其余文件）
    pub fn first_of(files: Option<web_sys::FileList>) -> Option<Self> {
        files?.get(0).map(Self)
    }
}

#[async_trait::async_trait(?Send)]
impl ImageSource for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime(&self) -> String {
        self.0.type_()
    }

    async fn read(&self) -> Result<ImageFile, ReadError> {
        let fail = |e: wasm_bindgen::JsValue| ReadError {
            name: self.name(),
            reason: format!("{:?}", e),
        };

        let buffer = JsFuture::from(self.0.array_buffer()).await.map_err(fail)?;
        let bytes = Uint8Array::new(&buffer).to_vec();
        Ok(ImageFile::new(self.name(), self.mime(), bytes))
    }
}
