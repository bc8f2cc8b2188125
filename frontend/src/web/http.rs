//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心层的 `HttpClient`。
//! multipart 请求体通过浏览器原生 `FormData` 构造，boundary 由浏览器生成。

use js_sys::{Array, Uint8Array};
use plantaid::request::{FormFile, HttpClient, HttpError, HttpRequest, HttpResponse, RequestBody};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

/// 浏览器 fetch 客户端
#[derive(Clone, Copy, Default)]
pub struct FetchHttpClient;

fn build_err(e: JsValue) -> HttpError {
    HttpError::RequestBuild(format!("{:?}", e))
}

/// 将文件字段转换为 FormData
fn form_data(files: &[FormFile]) -> Result<FormData, HttpError> {
    let form = FormData::new().map_err(build_err)?;
    for file in files {
        let bytes = Uint8Array::from(file.bytes.as_slice());
        let parts = Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&file.content_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(build_err)?;
        form.append_with_blob_and_filename(&file.field, &blob, &file.file_name)
            .map_err(build_err)?;
    }
    Ok(form)
}

async fn read_text(response: Response) -> Result<String, HttpError> {
    let promise = response
        .text()
        .map_err(|e| HttpError::ResponseRead(format!("{:?}", e)))?;

    let text = JsFuture::from(promise)
        .await
        .map_err(|e| HttpError::ResponseRead(format!("{:?}", e)))?;

    text.as_string()
        .ok_or_else(|| HttpError::ResponseRead("无法转换为字符串".to_string()))
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new().map_err(build_err)?;
        for (key, value) in &req.headers {
            headers.set(key, value).map_err(build_err)?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            Some(RequestBody::Json(text)) => opts.set_body(&JsValue::from_str(text)),
            Some(RequestBody::Multipart(files)) => opts.set_body(&form_data(files)?.into()),
            None => {}
        }

        let request = Request::new_with_str_and_init(&req.url, &opts).map_err(build_err)?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::Network("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::Network(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::ResponseRead(format!("Response 类型转换失败: {:?}", e)))?;

        let status = response.status();
        let body = read_text(response).await?;
        Ok(HttpResponse { status, body })
    }
}
