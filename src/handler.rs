//! # 命令处理逻辑模块
//!
//! 包含处理各个子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。
//! 隐写只作用于输入图像的一份独立副本，原始文件永远不会被修改。

use crate::carrier::working_copy;
use crate::cli::{
    AlgorithmKind, BenchArgs, CapacityArgs, CodecArgs, ExtractArgs, HideArgs, RestoreArgs,
};
use crate::constants::{
    DEFAULT_IMAGE_EXTENSION, DEFAULT_PAYLOAD_EXTENSION, DOCTORED_PREFIX, RECOVERED_PREFIX,
    RESTORED_PREFIX,
};
use crate::deidentification::DeidentifyingSteganography;
use crate::error::StegoError;
use crate::lsb::LsbSteganography;
use crate::rgb_bits::{RgbBitsConfig, RgbBitsSteganography};
use crate::steganography::{Algorithm, Steganography};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{DynamicImage, RgbaImage};
use log::{info, warn};
use rand::RngCore;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和载荷 (文件、命令行文本或被涂黑区域的原始像素)、按需涂黑去标识化区域、调用隐写核心隐藏数据，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与算法参数的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 算法参数不合法。
/// * 无法读取输入的图像或载荷文件。
/// * 图像没有足够的空间来隐藏载荷。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args.dest.clone().unwrap_or_else(|| {
        default_output_path(&args.image, DOCTORED_PREFIX, DEFAULT_IMAGE_EXTENSION)
    });
    ensure_writable(&dest, args.force)?;

    let algorithm = build_algorithm(&args.codec, args.redact.is_some())?;
    let mut carrier = working_copy(&load_image(&args.image)?);

    let payload = match (&args.payload, &args.text, args.redact) {
        (_, _, Some(region)) if args.embed_region => region.capture(&carrier).with_context(|| {
            format!(
                "Unable to capture region {} from the image.",
                format!("{region:?}").red().bold()
            )
        })?,
        (Some(path), _, _) => fs::read(path).with_context(|| {
            format!(
                "Unable to read payload file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, Some(text), _) => text.as_bytes().to_vec(),
        (None, None, _) => {
            anyhow::bail!("No payload given. Use --payload, --text or --embed-region.")
        }
    };

    if let (Algorithm::Deidentifying(deidentifier), Some(region)) = (&algorithm, args.redact) {
        deidentifier
            .preprocess_original_image(&mut carrier, region)
            .with_context(|| "Failed to black out the requested region.")?;
    }

    algorithm
        .hide_data(&payload, &mut carrier)
        .map_err(|e| {
            let message = match &e {
                StegoError::InsufficientSpace {
                    capacity,
                    requested,
                } => format!(
                    "Not enough space in the image to hide the data. \nRequired: {}, Available: {}",
                    requested.to_string().red().bold(),
                    capacity.to_string().green().bold()
                ),
                _ => "Failed to hide the data in the image.".to_string(),
            };
            anyhow::Error::new(e).context(message)
        })?;

    save_image(&carrier, &dest)?;

    println!(
        "The data ({} bytes) has been successfully hidden and saved: {}",
        payload.len(),
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用提取核心函数获取载荷，
/// 最后将载荷写入目标文件；指定 `--text` 时改为把载荷作为文本打印。
/// 必须使用与隐藏时相同的算法参数。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 长度前缀不可信 (图像未经隐写、已损坏或参数不一致)。
/// * 指定了 `--text`，但载荷不是合法的 UTF-8。
/// * 无法写入到目标文件。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let output = (!args.text).then(|| {
        args.output.clone().unwrap_or_else(|| {
            default_output_path(&args.image, RECOVERED_PREFIX, DEFAULT_PAYLOAD_EXTENSION)
        })
    });
    if let Some(output) = &output {
        ensure_writable(output, args.force)?;
    }

    let algorithm = build_algorithm(&args.codec, false)?;
    let carrier = working_copy(&load_image(&args.image)?);

    let payload = extract_from(&algorithm, &carrier, &args.image)?;

    let Some(output) = output else {
        let text = String::from_utf8(payload).with_context(|| {
            format!(
                "The extracted data is not valid UTF-8 text. Extract it to a file with {} instead.",
                "--output".yellow().bold()
            )
        })?;
        println!("{text}");
        return Ok(());
    };

    fs::write(&output, &payload).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The data ({} bytes) has been successfully extracted and saved: {}",
        payload.len(),
        output.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Restore' 命令的执行逻辑。
///
/// 提取隐藏的区域像素，把它们写回被涂黑的矩形，再保存恢复后的图像。
///
/// # Errors
///
/// 除 [`handle_extract`] 的错误外，区域与提取出的像素数据不匹配时也会返回错误。
pub fn handle_restore(args: RestoreArgs) -> Result<()> {
    let dest = args.dest.clone().unwrap_or_else(|| {
        default_output_path(&args.image, RESTORED_PREFIX, DEFAULT_IMAGE_EXTENSION)
    });
    ensure_writable(&dest, args.force)?;

    let algorithm = build_algorithm(&args.codec, false)?;
    let mut carrier = working_copy(&load_image(&args.image)?);

    let pixels = extract_from(&algorithm, &carrier, &args.image)?;
    args.region.restore(&mut carrier, &pixels).with_context(|| {
        format!(
            "The hidden data does not match region {}.",
            format!("{:?}", args.region).red().bold()
        )
    })?;

    save_image(&carrier, &dest)?;

    println!(
        "The region has been successfully restored and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Capacity' 命令：打印给定参数下图像最多能隐藏的字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let algorithm = build_algorithm(&args.codec, false)?;
    let carrier = working_copy(&load_image(&args.image)?);

    println!(
        "Maximum bytes to hide: {}",
        algorithm.max_bytes(&carrier).to_string().green().bold()
    );

    Ok(())
}

/// 处理 'Bench' 命令的执行逻辑。
///
/// 对每一种 (分量数, 比特数) 组合，生成恰好等于容量的随机载荷，
/// 隐藏到原图的独立副本中，并保存为 `<目录>/<K>_components-<N>_bits.png`。
/// 单个组合失败只会被报告，不会中断整个流程。
///
/// # Errors
///
/// 无法读取原图、无法创建目录，或所有组合都失败时返回错误。
pub fn handle_bench(args: BenchArgs) -> Result<()> {
    let source = working_copy(&load_image(&args.image)?);

    fs::create_dir_all(&args.out_dir).with_context(|| {
        format!(
            "Unable to create output directory: {}",
            args.out_dir.to_string_lossy().red().bold()
        )
    })?;

    let mut rng = rand::rng();
    let mut written = 0usize;
    let mut total = 0usize;

    for config in RgbBitsConfig::all() {
        total += 1;
        let algorithm = RgbBitsSteganography::from(config);
        let max_bytes = usize::try_from(algorithm.max_bytes(&source)).unwrap_or(0);
        let mut payload = vec![0u8; max_bytes];
        rng.fill_bytes(&mut payload);

        let mut copy = source.clone();
        let target = args
            .out_dir
            .join(format!("{config}.{DEFAULT_IMAGE_EXTENSION}"));

        let outcome = algorithm
            .hide_data(&payload, &mut copy)
            .map_err(anyhow::Error::from)
            .and_then(|()| save_image(&copy, &target));

        match outcome {
            Ok(()) => {
                written += 1;
                println!(
                    "{}: {} bytes -> {}",
                    config.to_string().green().bold(),
                    max_bytes,
                    target.to_string_lossy()
                );
            }
            Err(e) => {
                warn!("Configuration {config} failed: {e:#}");
                eprintln!("{}: {:#}", config.to_string().red().bold(), e);
            }
        }
    }

    anyhow::ensure!(
        written > 0,
        "No configuration could be written. \nThe image {} is too small.",
        args.image.to_string_lossy().red().bold()
    );

    println!(
        "{} of {} configurations saved to: {}",
        written.to_string().green().bold(),
        total,
        args.out_dir.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 根据命令行参数构造隐写算法。`deidentify` 为真时使用带去标识化预处理的多平面算法。
pub fn build_algorithm(codec: &CodecArgs, deidentify: bool) -> Result<Algorithm> {
    match codec.algorithm {
        AlgorithmKind::Lsb => {
            anyhow::ensure!(
                !deidentify,
                "Region redaction requires the {} algorithm.",
                "rgb-bits".green().bold()
            );
            Ok(Algorithm::Lsb(LsbSteganography))
        }
        AlgorithmKind::RgbBits => {
            let algorithm = RgbBitsSteganography::new(codec.components, codec.bits)
                .with_context(|| "Invalid steganography parameters.")?;
            info!("Using rgb-bits with {}", algorithm.config());
            Ok(if deidentify {
                Algorithm::Deidentifying(DeidentifyingSteganography::new(algorithm))
            } else {
                Algorithm::RgbBits(algorithm)
            })
        }
    }
}

/// 在输入文件所在目录下生成 `<前缀><文件名>.<扩展名>` 形式的默认输出路径。
pub fn default_output_path(input: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    input.with_file_name(format!("{prefix}{stem}.{extension}"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    info!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

fn save_image(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save(path).with_context(|| {
        format!(
            "Unable to write to target image file: {} \nOnly lossless formats (PNG, BMP, TIFF, WebP, QOI) are supported.",
            path.to_string_lossy().red().bold()
        )
    })?;
    info!("Saved {}", path.display());
    Ok(())
}

fn extract_from(algorithm: &Algorithm, carrier: &RgbaImage, source: &Path) -> Result<Vec<u8>> {
    algorithm.extract_data(carrier).with_context(|| {
        format!(
            "Failed to extract hidden data from '{}'. \nThe image may not contain hidden data, or it was hidden with different parameters.",
            source.to_string_lossy().red().bold()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_sit_next_to_the_input() {
        let input = Path::new("/tmp/images/original.png");
        assert_eq!(
            default_output_path(input, DOCTORED_PREFIX, DEFAULT_IMAGE_EXTENSION),
            PathBuf::from("/tmp/images/doctored_original.png")
        );
        assert_eq!(
            default_output_path(input, RECOVERED_PREFIX, DEFAULT_PAYLOAD_EXTENSION),
            PathBuf::from("/tmp/images/recovered_original.bin")
        );
    }

    #[test]
    fn lsb_cannot_be_combined_with_redaction() {
        let codec = CodecArgs {
            algorithm: AlgorithmKind::Lsb,
            components: 1,
            bits: 1,
        };
        assert!(build_algorithm(&codec, true).is_err());
        assert_eq!(
            build_algorithm(&codec, false).unwrap(),
            Algorithm::Lsb(LsbSteganography)
        );
    }

    #[test]
    fn invalid_parameters_surface_configuration_error() {
        let codec = CodecArgs {
            algorithm: AlgorithmKind::RgbBits,
            components: 4,
            bits: 1,
        };
        let err = build_algorithm(&codec, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StegoError>(),
            Some(StegoError::InvalidConfiguration { value: 4, .. })
        ));
    }
}
